//! `MonteCarloTreeSearch`: UCT over a partial-move tree.
//!
//! GDL moves are simultaneous, so there is no single role to move between
//! game states. The tree splits one ply into `|roles|` levels, one per
//! role, cycling in role order starting from this player's own role; the
//! underlying game state only advances once every role along a path has
//! contributed its part of the joint move.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::game::{Action, Game, Role, State};
use crate::player::{Player, PlayerError, Timer};
use crate::players::util::random_playout;

type NodeId = usize;

struct Node {
    base_state: State,
    pending: Vec<(Role, Action)>,
    role_index: usize,
    role: Role,
    unseen_actions: Vec<Action>,
    children: HashMap<Action, NodeId>,
    total_score: f64,
    times_seen: u32,
}

impl Node {
    fn mean_score(&self) -> f64 {
        if self.times_seen == 0 {
            0.0
        } else {
            self.total_score / self.times_seen as f64
        }
    }

}

struct Tree {
    nodes: Vec<Node>,
    roles: Vec<Role>,
    own_role_index: usize,
    root: NodeId,
}

impl Tree {
    fn new(roles: Vec<Role>, own_role: &Role, state: State, rng: &mut StdRng) -> Self {
        let own_role_index = roles.iter().position(|r| r == own_role).expect("own role is one of the game's roles");
        let mut tree = Tree { nodes: Vec::new(), roles, own_role_index, root: 0 };
        tree.root = tree.new_node(state, Vec::new(), own_role_index, rng);
        tree
    }

    fn new_node(&mut self, base_state: State, pending: Vec<(Role, Action)>, role_index: usize, rng: &mut StdRng) -> NodeId {
        let role = self.roles[role_index].clone();
        let mut unseen_actions = base_state.legal_actions(&role);
        unseen_actions.shuffle(rng);
        let id = self.nodes.len();
        self.nodes.push(Node {
            base_state,
            pending,
            role_index,
            role,
            unseen_actions,
            children: HashMap::new(),
            total_score: 0.0,
            times_seen: 0,
        });
        id
    }

    fn is_full_ply(&self, id: NodeId) -> bool {
        self.nodes[id].pending.len() + 1 == self.roles.len()
    }

    fn expand(&mut self, id: NodeId, rng: &mut StdRng) -> Result<NodeId, PlayerError> {
        let action = self.nodes[id].unseen_actions.pop().expect("caller checked unseen_actions is non-empty");
        let mut pending = self.nodes[id].pending.clone();
        pending.push((self.nodes[id].role.clone(), action.clone()));

        let child = if self.is_full_ply(id) {
            let next_state = self.nodes[id].base_state.apply(&pending)?;
            self.new_node(next_state, Vec::new(), self.own_role_index, rng)
        } else {
            let base_state = self.nodes[id].base_state.clone();
            let next_role_index = (self.nodes[id].role_index + 1) % self.roles.len();
            self.new_node(base_state, pending, next_role_index, rng)
        };
        self.nodes[id].children.insert(action, child);
        Ok(child)
    }

    fn select_child(&self, id: NodeId, own_role: &Role, c: f64, rng: &mut StdRng) -> NodeId {
        let log_times_seen = (self.nodes[id].times_seen as f64).ln();
        let perspective = &self.nodes[id].role;
        let mut children: Vec<NodeId> = self.nodes[id].children.values().copied().collect();
        children.shuffle(rng);
        children
            .into_iter()
            .max_by(|&a, &b| {
                let ucb_a = self.upper_confidence_bound(a, own_role, perspective, log_times_seen, c);
                let ucb_b = self.upper_confidence_bound(b, own_role, perspective, log_times_seen, c);
                ucb_a.partial_cmp(&ucb_b).unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("selection only runs when action_child is non-empty")
    }

    fn upper_confidence_bound(&self, id: NodeId, own_role: &Role, perspective: &Role, log_parent_times_seen: f64, c: f64) -> f64 {
        let node = &self.nodes[id];
        let factor = if perspective == own_role { 1.0 } else { -1.0 };
        node.mean_score() * factor + c * (log_parent_times_seen / node.times_seen as f64).sqrt()
    }

    fn backpropagate(&mut self, path: &[NodeId], score: f64) {
        for &id in path {
            let node = &mut self.nodes[id];
            node.total_score += score;
            node.times_seen += 1;
        }
    }
}

fn normalize(utility: i64, min_utility: i64, max_utility: i64) -> f64 {
    (utility - min_utility) as f64 / (max_utility - min_utility) as f64
}

pub struct MonteCarloTreeSearch {
    game: Arc<Game>,
    role: Role,
    state: State,
    tree: Tree,
    c: f64,
    rng: StdRng,
    start_clock: Duration,
    play_clock: Duration,
}

impl MonteCarloTreeSearch {
    pub fn new(game: Arc<Game>, role: Role, start_clock: Duration, play_clock: Duration, c: f64, mut rng: StdRng) -> Self {
        let state = game.initial_state();
        let tree = Tree::new(game.roles().to_vec(), &role, state.clone(), &mut rng);
        let mut player = MonteCarloTreeSearch { game, role, state, tree, c, rng, start_clock, play_clock };
        let timer = Timer::new(player.start_clock, Duration::from_secs(2));
        while timer.check().is_ok() {
            if player.run_search(&timer).is_err() {
                break;
            }
        }
        player
    }

    fn run_search(&mut self, timer: &Timer) -> Result<(), PlayerError> {
        let mut current = self.tree.root;
        let mut path = vec![current];

        while self.tree.nodes[current].unseen_actions.is_empty() && !self.tree.nodes[current].children.is_empty() {
            timer.check()?;
            current = self.tree.select_child(current, &self.role, self.c, &mut self.rng);
            path.push(current);
        }

        if self.tree.nodes[current].base_state.is_terminal() {
            let utility = self.tree.nodes[current].base_state.utility(&self.role);
            let score = normalize(utility, self.game.min_utility(), self.game.max_utility());
            self.tree.backpropagate(&path, score);
            return Ok(());
        }

        let leaf = self.tree.expand(current, &mut self.rng)?;
        path.push(leaf);

        let utility = random_playout(self.tree.nodes[leaf].base_state.clone(), &self.role, &mut self.rng, timer)?;
        let score = normalize(utility, self.game.min_utility(), self.game.max_utility());
        self.tree.backpropagate(&path, score);
        Ok(())
    }

    fn best_root_action(&self) -> Option<Action> {
        self.tree.nodes[self.tree.root]
            .children
            .iter()
            .filter(|(_, &id)| self.tree.nodes[id].times_seen > 0)
            .max_by(|(_, &a), (_, &b)| self.tree.nodes[a].mean_score().partial_cmp(&self.tree.nodes[b].mean_score()).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(action, _)| action.clone())
    }
}

impl Player for MonteCarloTreeSearch {
    fn update_moves(&mut self, joint: &[(Role, Action)]) -> Result<(), PlayerError> {
        self.state = self.state.apply(joint)?;

        let mut current = self.tree.root;
        let mut ok = true;
        for step in 0..self.tree.roles.len() {
            let role = &self.tree.roles[(self.tree.own_role_index + step) % self.tree.roles.len()];
            let Some((_, action)) = joint.iter().find(|(r, _)| r == role) else {
                ok = false;
                break;
            };
            match self.tree.nodes[current].children.get(action).copied() {
                Some(child) => current = child,
                None => {
                    ok = false;
                    break;
                },
            }
        }

        if ok && self.tree.nodes[current].base_state == self.state {
            self.tree.root = current;
        } else {
            self.tree = Tree::new(self.game.roles().to_vec(), &self.role, self.state.clone(), &mut self.rng);
        }
        Ok(())
    }

    fn get_move(&mut self) -> Result<Action, PlayerError> {
        let timer = Timer::new(self.play_clock, Duration::from_secs(3));
        while timer.check().is_ok() {
            if self.run_search(&timer).is_err() {
                break;
            }
        }
        self.best_root_action().ok_or(PlayerError::NoLegalMoves)
    }

    fn stop(&mut self) {
        tracing::info!(terminal = self.state.is_terminal(), utility = self.state.utility(&self.role), "stopping match");
    }

    fn abort(&mut self) {
        tracing::info!("aborting match");
    }
}
