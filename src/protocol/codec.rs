//! Maps the wire envelope (`§6`) to and from a typed [`Request`]/[`Response`]
//! pair, grounded in the source's `handle_message`/`do_*` dispatch, which
//! switches on the first element of the parsed s-expression and checks a
//! fixed argument count per message type.

use std::time::Duration;

use crate::protocol::error::ProtocolError;
use crate::protocol::sexpr::{parse_one, SExpr};

#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    Info,
    Start { game_id: String, role: String, rules: String, start_clock: Duration, play_clock: Duration },
    Play { game_id: String, moves: Option<Vec<String>> },
    Stop { game_id: String, moves: Option<Vec<String>> },
    Abort { game_id: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Info { name: String, busy: bool },
    Ready,
    Action(String),
    Done,
}

impl Response {
    pub fn to_source(&self) -> String {
        match self {
            Response::Info { name, busy } => {
                format!("((name {name}) (status {}))", if *busy { "busy" } else { "available" })
            },
            Response::Ready => "ready".to_string(),
            Response::Action(text) => text.clone(),
            Response::Done => "done".to_string(),
        }
    }
}

fn atoms(expr: &SExpr) -> Result<&[SExpr], ProtocolError> {
    expr.list().ok_or_else(|| ProtocolError::Malformed("expected a list".to_string()))
}

fn word(expr: &SExpr) -> Result<&str, ProtocolError> {
    expr.atom().ok_or_else(|| ProtocolError::Malformed("expected an atom".to_string()))
}

fn seconds(expr: &SExpr, field: &str) -> Result<Duration, ProtocolError> {
    let text = word(expr)?;
    let n: u64 = text.parse().map_err(|_| ProtocolError::Malformed(format!("`{field}` must be an integer number of seconds")))?;
    Ok(Duration::from_secs(n))
}

/// `nil` means "no moves yet" (the very first `play`/`stop` of a match);
/// anything else must be a list of one action per role.
fn moves(expr: &SExpr) -> Result<Option<Vec<String>>, ProtocolError> {
    if expr.atom() == Some("nil") {
        return Ok(None);
    }
    let items = atoms(expr)?;
    Ok(Some(items.iter().map(SExpr::to_source).collect()))
}

fn expect_arity(message_type: &str, args: &[SExpr], expected: usize) -> Result<(), ProtocolError> {
    if args.len() != expected {
        return Err(ProtocolError::Malformed(format!(
            "wrong number of arguments for message type \"{message_type}\": expected {expected}, got {}",
            args.len()
        )));
    }
    Ok(())
}

pub fn parse_request(body: &str) -> Result<Request, ProtocolError> {
    let expr = parse_one(body)?;
    let items = atoms(&expr)?;
    let (head, args) = items.split_first().ok_or_else(|| ProtocolError::Malformed("empty message".to_string()))?;
    let message_type = word(head)?;

    match message_type {
        "info" => {
            expect_arity("info", args, 0)?;
            Ok(Request::Info)
        },
        "start" => {
            expect_arity("start", args, 5)?;
            Ok(Request::Start {
                game_id: word(&args[0])?.to_string(),
                role: word(&args[1])?.to_string(),
                rules: args[2].to_source(),
                start_clock: seconds(&args[3], "start_clock")?,
                play_clock: seconds(&args[4], "play_clock")?,
            })
        },
        "play" => {
            expect_arity("play", args, 2)?;
            Ok(Request::Play { game_id: word(&args[0])?.to_string(), moves: moves(&args[1])? })
        },
        "stop" => {
            expect_arity("stop", args, 2)?;
            Ok(Request::Stop { game_id: word(&args[0])?.to_string(), moves: moves(&args[1])? })
        },
        "abort" => {
            expect_arity("abort", args, 1)?;
            Ok(Request::Abort { game_id: word(&args[0])?.to_string() })
        },
        other => Err(ProtocolError::Malformed(format!("no handler for message type \"{other}\""))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_info() {
        assert_eq!(parse_request("(info)").unwrap(), Request::Info);
    }

    #[test]
    fn parses_start_with_embedded_rules() {
        let request = parse_request("(start g1 robot ((role robot) (base p)) 10 5)").unwrap();
        match request {
            Request::Start { game_id, role, rules, start_clock, play_clock } => {
                assert_eq!(game_id, "g1");
                assert_eq!(role, "robot");
                assert_eq!(rules, "(role robot) (base p)");
                assert_eq!(start_clock, Duration::from_secs(10));
                assert_eq!(play_clock, Duration::from_secs(5));
            },
            _ => panic!("expected Start"),
        }
    }

    #[test]
    fn parses_play_with_nil_moves() {
        let request = parse_request("(play g1 nil)").unwrap();
        assert_eq!(request, Request::Play { game_id: "g1".to_string(), moves: None });
    }

    #[test]
    fn parses_play_with_moves() {
        let request = parse_request("(play g1 (a (mark 1 1)))").unwrap();
        assert_eq!(
            request,
            Request::Play { game_id: "g1".to_string(), moves: Some(vec!["a".to_string(), "(mark 1 1)".to_string()]) }
        );
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(parse_request("(abort)").is_err());
    }

    #[test]
    fn renders_info_response() {
        let response = Response::Info { name: "AlphaBeta".to_string(), busy: false };
        assert_eq!(response.to_source(), "((name AlphaBeta) (status available))");
    }
}
