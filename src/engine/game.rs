use super::action::Action;
use super::config::Config;
use super::error::EngineError;
use super::seat::{Seat, Status};
use super::showdown::ShowdownResult;
use super::sidepot::SidePot;
use crate::cards::{evaluate, Deck};
use crate::Chips;
use std::collections::HashSet;

/// Betting-round / hand-lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// Deterministic state machine for one hand. Owns the deck and per-seat
/// hand state; never refers to users, chat, or transport (those belong to
/// the Lobby layer that wraps this).
#[derive(Debug, Clone)]
pub struct Game {
    pub seats: Vec<Seat>,
    pub deck: Deck,
    pub stage: Stage,
    pub pot: Chips,
    pub board: Vec<crate::cards::Card>,
    pub button_pos: Option<usize>,
    pub sb_pos: Option<usize>,
    pub bb_pos: Option<usize>,
    pub current_actor: Option<usize>,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub has_acted: Vec<bool>,
    pub side_pots: Vec<SidePot>,
    pub showdown_results: Vec<ShowdownResult>,
    pub is_all_in_showdown: bool,
    pub fold_winner: Option<usize>,
    pub config: Config,
}

impl Game {
    pub fn new(config: Config) -> Game {
        let n = config.max_seats;
        Game {
            seats: (0..n).map(|_| Seat::empty()).collect(),
            deck: Deck::shuffled(),
            stage: Stage::Idle,
            pot: 0,
            board: Vec::new(),
            button_pos: None,
            sb_pos: None,
            bb_pos: None,
            current_actor: None,
            current_bet: 0,
            min_raise: config.big_blind,
            has_acted: vec![false; n],
            side_pots: Vec::new(),
            showdown_results: Vec::new(),
            is_all_in_showdown: false,
            fold_winner: None,
            config,
        }
    }

    // ---- 4.1.1 starting a hand -------------------------------------------------

    /// Returns true if a hand was started. A no-op (returning false) when the
    /// stage isn't Idle or fewer than two seats are eligible.
    pub fn start_hand(&mut self) -> bool {
        if self.stage != Stage::Idle {
            return false;
        }
        let eligible_count = self.seats.iter().filter(|s| s.is_eligible_for_hand()).count();
        if eligible_count < 2 {
            return false;
        }

        for seat in self.seats.iter_mut() {
            if seat.is_vacant() {
                seat.current_bet = 0;
                seat.total_bet = 0;
                seat.hand.clear();
                seat.show_cards = false;
                continue;
            }
            seat.status = if seat.chips == 0 || !seat.is_connected {
                Status::SittingOut
            } else {
                Status::Active
            };
            seat.current_bet = 0;
            seat.total_bet = 0;
            seat.hand.clear();
            seat.show_cards = false;
        }

        self.pot = 0;
        self.board.clear();
        self.side_pots.clear();
        self.showdown_results.clear();
        self.fold_winner = None;
        self.is_all_in_showdown = false;
        self.has_acted = vec![false; self.seats.len()];

        self.deck = Deck::shuffled();

        let n = self.seats.len();
        let mut candidate = self.button_pos.map(|p| (p + 1) % n).unwrap_or(0);
        let mut button = None;
        for _ in 0..(2 * n) {
            if self.seats[candidate].is_eligible_for_hand() {
                button = Some(candidate);
                break;
            }
            candidate = (candidate + 1) % n;
        }
        let button = button.expect("eligible_count >= 2 guarantees a button seat");
        self.button_pos = Some(button);

        // Ring order starting left of the button, wrapping back to (and
        // including) the button itself -- the order both blinds and the
        // deal follow.
        let order: Vec<usize> = (1..=n)
            .map(|offset| (button + offset) % n)
            .filter(|&i| self.seats[i].is_eligible_for_hand())
            .collect();

        let (sb, bb) = if eligible_count == 2 {
            (button, order[0])
        } else {
            (order[0], order[1])
        };
        self.sb_pos = Some(sb);
        self.bb_pos = Some(bb);

        let sb_amount = self.config.small_blind.min(self.seats[sb].chips);
        self.post(sb, sb_amount);
        let bb_amount = self.config.big_blind.min(self.seats[bb].chips);
        self.post(bb, bb_amount);

        self.current_bet = self.config.big_blind;
        self.min_raise = self.config.big_blind;

        for _ in 0..2 {
            for &idx in &order {
                if let Some(card) = self.deck.deal() {
                    self.seats[idx].hand.push(card);
                }
            }
        }

        let first_actor = if eligible_count == 2 { sb } else { order[2] };
        self.current_actor = Some(first_actor);
        self.stage = Stage::PreFlop;
        true
    }

    fn post(&mut self, idx: usize, amount: Chips) {
        let seat = &mut self.seats[idx];
        seat.chips -= amount;
        seat.current_bet += amount;
        seat.total_bet += amount;
        self.pot += amount;
    }

    // ---- 4.1.2 action processing ------------------------------------------------

    pub fn player_action(&mut self, id: &str, action: Action) -> Result<(), EngineError> {
        if matches!(self.stage, Stage::Idle | Stage::Showdown) {
            return Err(EngineError::WrongStage);
        }
        let idx = self.current_actor.ok_or(EngineError::NotYourTurn)?;
        if self.seats[idx].id.as_deref() != Some(id) {
            return Err(EngineError::NotYourTurn);
        }
        if self.seats[idx].status != Status::Active {
            return Err(EngineError::SeatNotActive);
        }

        match action {
            Action::Fold => {
                self.seats[idx].status = Status::Folded;
                self.mark_acted(idx);
                if !self.resolve_if_single_active_remains() {
                    self.next_turn();
                }
            }
            Action::Check => {
                if self.seats[idx].current_bet != self.current_bet {
                    return Err(EngineError::IllegalAmount);
                }
                self.mark_acted(idx);
                self.next_turn();
            }
            Action::Call => {
                let call_cost = self.current_bet - self.seats[idx].current_bet;
                if call_cost == 0 {
                    self.mark_acted(idx);
                } else if call_cost >= self.seats[idx].chips {
                    self.apply_allin(idx);
                } else {
                    let seat = &mut self.seats[idx];
                    seat.chips -= call_cost;
                    seat.current_bet += call_cost;
                    seat.total_bet += call_cost;
                    self.pot += call_cost;
                    self.mark_acted(idx);
                }
                self.next_turn();
            }
            Action::Raise(amount) => {
                let seat = &self.seats[idx];
                let to_add = amount - seat.current_bet;
                if to_add <= 0
                    || to_add > seat.chips
                    || amount < self.current_bet + self.min_raise
                {
                    return Err(EngineError::IllegalAmount);
                }
                let previous_current_bet = self.current_bet;
                {
                    let seat = &mut self.seats[idx];
                    seat.chips -= to_add;
                    seat.current_bet += to_add;
                    seat.total_bet += to_add;
                }
                self.pot += to_add;
                self.current_bet = amount;
                self.min_raise = amount - previous_current_bet;
                self.reopen_betting(idx);
                self.next_turn();
            }
            Action::AllIn => {
                self.apply_allin(idx);
                self.next_turn();
            }
        }
        Ok(())
    }

    fn apply_allin(&mut self, idx: usize) {
        let previous_current_bet = self.current_bet;
        let chips = self.seats[idx].chips;
        {
            let seat = &mut self.seats[idx];
            seat.chips = 0;
            seat.current_bet += chips;
            seat.total_bet += chips;
            seat.status = Status::AllIn;
        }
        self.pot += chips;
        if self.seats[idx].current_bet > previous_current_bet {
            let raise_size = self.seats[idx].current_bet - previous_current_bet;
            self.current_bet = self.seats[idx].current_bet;
            if raise_size >= self.min_raise {
                self.min_raise = raise_size;
                self.reopen_betting(idx);
            } else {
                self.mark_acted(idx);
            }
        } else {
            self.mark_acted(idx);
        }
    }

    fn mark_acted(&mut self, idx: usize) {
        self.has_acted[idx] = true;
    }

    fn reopen_betting(&mut self, idx: usize) {
        for i in 0..self.seats.len() {
            if self.seats[i].status == Status::Active {
                self.has_acted[i] = false;
            }
        }
        self.has_acted[idx] = true;
    }

    fn resolve_if_single_active_remains(&mut self) -> bool {
        let remaining: Vec<usize> = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s.status, Status::Active | Status::AllIn))
            .map(|(i, _)| i)
            .collect();
        if remaining.len() == 1 {
            self.fold_winner = Some(remaining[0]);
            self.distribute_pot();
            true
        } else {
            false
        }
    }

    // ---- 4.1.3 turn progression --------------------------------------------------

    fn next_turn(&mut self) {
        if matches!(self.stage, Stage::Idle | Stage::Showdown) {
            return;
        }
        if self.betting_round_complete() {
            self.next_street();
            return;
        }
        let n = self.seats.len();
        let start = self.current_actor.unwrap_or(0);
        let mut idx = (start + 1) % n;
        loop {
            let seat = &self.seats[idx];
            if seat.status == Status::Active
                && (!self.has_acted[idx] || seat.current_bet < self.current_bet)
            {
                break;
            }
            idx = (idx + 1) % n;
            if idx == start {
                break;
            }
        }
        self.current_actor = Some(idx);
        if self.seats[idx].status == Status::Active && !self.seats[idx].is_connected {
            self.auto_resolve_current_actor();
        }
    }

    fn betting_round_complete(&self) -> bool {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.status == Status::Active)
            .all(|(i, s)| self.has_acted[i] && s.current_bet == self.current_bet)
    }

    fn auto_resolve_current_actor(&mut self) {
        let Some(idx) = self.current_actor else { return };
        let id = self.seats[idx].id.clone().expect("current actor is seated");
        let action = if self.seats[idx].current_bet == self.current_bet {
            Action::Check
        } else {
            Action::Fold
        };
        let _ = self.player_action(&id, action);
    }

    // ---- 4.1.4 street advancement -------------------------------------------------

    fn next_street(&mut self) {
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
        self.has_acted = vec![false; self.seats.len()];
        for seat in self.seats.iter_mut() {
            if !matches!(seat.status, Status::Folded | Status::SittingOut) {
                seat.current_bet = 0;
            }
        }

        self.stage = match self.stage {
            Stage::PreFlop => Stage::Flop,
            Stage::Flop => Stage::Turn,
            Stage::Turn => Stage::River,
            Stage::River => Stage::Showdown,
            Stage::Idle | Stage::Showdown => return,
        };
        if self.stage == Stage::Showdown {
            self.distribute_pot();
            return;
        }

        let deal_count = match self.stage {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            _ => 0,
        };
        self.deck.deal(); // burn
        for _ in 0..deal_count {
            if let Some(card) = self.deck.deal() {
                self.board.push(card);
            }
        }

        if self.active_count() > 0 {
            if let Some(idx) = self.first_active_left_of_button() {
                self.current_actor = Some(idx);
                if !self.seats[idx].is_connected {
                    self.auto_resolve_current_actor();
                }
            }
        } else {
            self.current_actor = None;
        }

        self.maybe_auto_runout();
    }

    fn maybe_auto_runout(&mut self) {
        while self.stage != Stage::Showdown
            && self.active_count() < 2
            && self.in_hand_count() > 1
        {
            self.next_street();
        }
    }

    fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| s.status == Status::Active).count()
    }

    fn in_hand_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| matches!(s.status, Status::Active | Status::AllIn))
            .count()
    }

    fn first_active_left_of_button(&self) -> Option<usize> {
        let n = self.seats.len();
        let button = self.button_pos.unwrap_or(0);
        (1..=n)
            .map(|o| (button + o) % n)
            .find(|&i| self.seats[i].status == Status::Active)
    }

    fn ring_order(&self, subset: &[usize]) -> Vec<usize> {
        let n = self.seats.len();
        let start = (self.button_pos.unwrap_or(0) + 1) % n;
        let mut ordered = subset.to_vec();
        ordered.sort_unstable_by_key(|&idx| (idx + n - start) % n);
        ordered
    }

    // ---- 4.1.5 side-pot decomposition ---------------------------------------------

    fn resolve_side_pots(&mut self) {
        let mut levels: Vec<Chips> = self.seats.iter().map(|s| s.total_bet).filter(|&b| b > 0).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots = Vec::new();
        let mut previous = 0;
        for level in levels {
            let amount: Chips = self
                .seats
                .iter()
                .map(|s| s.total_bet.min(level) - s.total_bet.min(previous))
                .sum();
            if amount > 0 {
                let eligible: Vec<usize> = self
                    .seats
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.total_bet >= level && !matches!(s.status, Status::Folded | Status::SittingOut))
                    .map(|(i, _)| i)
                    .collect();
                pots.push(SidePot { amount, eligible });
            }
            previous = level;
        }
        self.side_pots = pots;
    }

    // ---- 4.1.6 pot distribution ----------------------------------------------------

    fn distribute_pot(&mut self) {
        self.resolve_side_pots();
        self.is_all_in_showdown = self.active_count() < 2;

        let mut chips_won = vec![0 as Chips; self.seats.len()];
        for pot in self.side_pots.clone() {
            if pot.eligible.len() == 1 {
                chips_won[pot.eligible[0]] += pot.amount;
                continue;
            }
            let mut best = u32::MAX;
            let mut winners = Vec::new();
            for &idx in &pot.eligible {
                let mut seven = self.seats[idx].hand.clone();
                seven.extend_from_slice(&self.board);
                if seven.len() < 5 {
                    continue;
                }
                let rank = evaluate(&seven);
                match rank.cmp(&best) {
                    std::cmp::Ordering::Less => {
                        best = rank;
                        winners.clear();
                        winners.push(idx);
                    }
                    std::cmp::Ordering::Equal => winners.push(idx),
                    std::cmp::Ordering::Greater => {}
                }
            }
            if winners.is_empty() {
                continue;
            }
            let share = pot.amount / winners.len() as Chips;
            let mut remainder = pot.amount - share * winners.len() as Chips;
            let ordered = self.ring_order(&winners);
            for &idx in &ordered {
                chips_won[idx] += share;
            }
            let mut i = 0;
            while remainder > 0 {
                chips_won[ordered[i % ordered.len()]] += 1;
                remainder -= 1;
                i += 1;
            }
        }

        for (idx, &won) in chips_won.iter().enumerate() {
            self.seats[idx].chips += won;
        }

        if self.stage == Stage::Showdown {
            let is_all_in_showdown = self.is_all_in_showdown;
            for idx in 0..self.seats.len() {
                if !matches!(self.seats[idx].status, Status::Active | Status::AllIn) {
                    continue;
                }
                let hand_rank = if self.seats[idx].hand.len() + self.board.len() >= 5 {
                    let mut seven = self.seats[idx].hand.clone();
                    seven.extend_from_slice(&self.board);
                    Some(evaluate(&seven))
                } else {
                    None
                };
                let must_show = chips_won[idx] > 0 || is_all_in_showdown;
                self.seats[idx].show_cards = must_show;
                self.showdown_results.push(ShowdownResult {
                    seat_index: idx,
                    hand_rank,
                    chips_won: chips_won[idx],
                    must_show,
                    has_decided: must_show,
                });
            }
        }

        self.pot = 0;
        self.check_showdown_resolved();
    }

    fn check_showdown_resolved(&mut self) {
        if self.stage == Stage::Showdown && self.showdown_results.iter().all(|r| r.has_decided) {
            self.stage = Stage::Idle;
        }
    }

    // ---- 4.1.7 muck-or-show ---------------------------------------------------------

    pub fn player_muck_or_show(&mut self, id: &str, show: bool) -> Result<(), EngineError> {
        if let Some(winner_idx) = self.fold_winner {
            if self.seats[winner_idx].id.as_deref() == Some(id) {
                self.seats[winner_idx].show_cards = show;
                self.stage = Stage::Idle;
                self.fold_winner = None;
                return Ok(());
            }
        }
        if self.stage != Stage::Showdown {
            return Err(EngineError::WrongStage);
        }
        let seat_idx = self
            .seats
            .iter()
            .position(|s| s.id.as_deref() == Some(id))
            .ok_or(EngineError::NotEligible)?;
        let result = self
            .showdown_results
            .iter_mut()
            .find(|r| r.seat_index == seat_idx)
            .ok_or(EngineError::NotEligible)?;
        if result.must_show {
            return Err(EngineError::NotEligible);
        }
        result.has_decided = true;
        self.seats[seat_idx].show_cards = show;
        self.check_showdown_resolved();
        Ok(())
    }

    // ---- 4.1.8 lifecycle management helpers -----------------------------------------

    pub fn sit_player_at(&mut self, seat_index: usize, id: &str, name: &str, buy_in: Chips) -> Result<(), EngineError> {
        if buy_in <= 0 {
            return Err(EngineError::IllegalAmount);
        }
        let seat = self.seats.get(seat_index).ok_or(EngineError::SeatVacant)?;
        if !seat.is_vacant() {
            return Err(EngineError::SeatOccupied);
        }
        if self.seats.iter().any(|s| s.id.as_deref() == Some(id)) {
            return Err(EngineError::AlreadySeatedElsewhere);
        }
        let seat = &mut self.seats[seat_index];
        seat.id = Some(id.to_string());
        seat.name = name.to_string();
        seat.chips = buy_in;
        seat.status = Status::Waiting;
        Ok(())
    }

    pub fn rebuy_player(&mut self, id: &str, amount: Chips) -> Result<(), EngineError> {
        if amount <= 0 {
            return Err(EngineError::IllegalAmount);
        }
        let seat = self
            .seats
            .iter_mut()
            .find(|s| s.id.as_deref() == Some(id))
            .ok_or(EngineError::SeatVacant)?;
        seat.chips += amount;
        if seat.status == Status::SittingOut && seat.chips > 0 && seat.is_connected {
            seat.status = Status::Waiting;
        }
        Ok(())
    }

    pub fn forfeit_and_vacate_seat(&mut self, id: &str) -> Result<(), EngineError> {
        let idx = self
            .seats
            .iter()
            .position(|s| s.id.as_deref() == Some(id))
            .ok_or(EngineError::SeatVacant)?;
        let hand_in_progress = self.stage != Stage::Idle;
        let was_in_hand = self.seats[idx].is_in_hand();

        if hand_in_progress && was_in_hand {
            self.seats[idx].status = Status::Folded;
            self.mark_acted(idx);
            if !self.resolve_if_single_active_remains() && self.current_actor == Some(idx) {
                self.next_turn();
            }
        }
        self.vacate_seat(idx, hand_in_progress && was_in_hand);
        Ok(())
    }

    fn vacate_seat(&mut self, idx: usize, preserve_bets: bool) {
        let seat = &mut self.seats[idx];
        seat.id = None;
        seat.name.clear();
        seat.hand.clear();
        seat.show_cards = false;
        seat.is_connected = false;
        seat.chips = 0;
        if preserve_bets {
            seat.status = Status::Folded;
        } else {
            seat.current_bet = 0;
            seat.total_bet = 0;
            seat.status = Status::SittingOut;
        }
    }

    pub fn set_player_connection(&mut self, id: &str, connected: bool) {
        let idx = match self.seats.iter().position(|s| s.id.as_deref() == Some(id)) {
            Some(i) => i,
            None => return,
        };
        self.seats[idx].is_connected = connected;
        if !connected
            && self.current_actor == Some(idx)
            && !matches!(self.stage, Stage::Idle | Stage::Showdown)
        {
            self.auto_resolve_current_actor();
        }
    }

    pub fn mark_waiting_if_eligible(&mut self, id: &str) {
        if let Some(seat) = self.seats.iter_mut().find(|s| s.id.as_deref() == Some(id)) {
            if seat.status == Status::SittingOut && seat.chips > 0 && seat.is_connected {
                seat.status = Status::Waiting;
            }
        }
    }

    pub fn remove_orphaned_seats(&mut self, valid_ids: &HashSet<String>) {
        let stale: Vec<String> = self
            .seats
            .iter()
            .filter_map(|s| s.id.clone())
            .filter(|id| !valid_ids.contains(id))
            .collect();
        for id in stale {
            let _ = self.forfeit_and_vacate_seat(&id);
        }
    }

    pub fn reset_for_end_game(&mut self) {
        self.stage = Stage::Idle;
        self.pot = 0;
        self.board.clear();
        self.side_pots.clear();
        self.showdown_results.clear();
        self.fold_winner = None;
        self.is_all_in_showdown = false;
        self.current_bet = 0;
        self.min_raise = self.config.big_blind;
        self.current_actor = None;
        for seat in self.seats.iter_mut() {
            seat.current_bet = 0;
            seat.total_bet = 0;
            seat.hand.clear();
            seat.show_cards = false;
            if !seat.is_vacant() {
                seat.status = if seat.chips > 0 { Status::Waiting } else { Status::SittingOut };
            }
        }
    }

    pub fn apply_config(&mut self, new_config: Config) {
        let old_len = self.seats.len();
        self.config = new_config;
        if new_config.max_seats != old_len {
            if new_config.max_seats > old_len {
                self.seats.resize_with(new_config.max_seats, Seat::empty);
                self.has_acted.resize(new_config.max_seats, false);
            } else {
                let stale: Vec<String> = self.seats[new_config.max_seats..]
                    .iter()
                    .filter_map(|s| s.id.clone())
                    .collect();
                for id in stale {
                    let _ = self.forfeit_and_vacate_seat(&id);
                }
                self.seats.truncate(new_config.max_seats);
                self.has_acted.truncate(new_config.max_seats);
            }
            let n = self.seats.len();
            self.button_pos = self.button_pos.map(|p| p.min(n.saturating_sub(1)));
            self.current_actor = self.current_actor.filter(|&p| p < n);
        }
    }

    pub fn set_button_position(&mut self, pos: usize) {
        if pos < self.seats.len() {
            self.button_pos = Some(pos);
        }
    }

    pub fn set_seat_stack_for_testing(&mut self, idx: usize, amount: Chips) {
        if let Some(seat) = self.seats.get_mut(idx) {
            seat.chips = amount;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heads_up() -> Game {
        let mut game = Game::new(Config {
            max_seats: 2,
            small_blind: 5,
            big_blind: 10,
        });
        game.sit_player_at(0, "a", "Alice", 1000).unwrap();
        game.sit_player_at(1, "b", "Bob", 1000).unwrap();
        for seat in game.seats.iter_mut() {
            seat.is_connected = true;
        }
        game
    }

    #[test]
    fn heads_up_deal_posts_blinds_and_deals_two_cards_each() {
        let mut game = heads_up();
        assert!(game.start_hand());
        assert_eq!(game.pot, 15);
        assert_eq!(game.current_bet, 10);
        assert_eq!(game.min_raise, 10);
        assert_eq!(game.seats[0].hand.len(), 2);
        assert_eq!(game.seats[1].hand.len(), 2);
        assert_eq!(game.current_actor, game.sb_pos);
        let stacks: Vec<Chips> = game.seats.iter().map(|s| s.chips).collect();
        assert!(stacks.contains(&995));
        assert!(stacks.contains(&990));
    }

    #[test]
    fn min_raise_reopen_scenario() {
        let mut game = Game::new(Config {
            max_seats: 3,
            small_blind: 5,
            big_blind: 10,
        });
        game.sit_player_at(0, "a", "A", 1000).unwrap();
        game.sit_player_at(1, "b", "B", 1000).unwrap();
        game.sit_player_at(2, "c", "C", 1000).unwrap();
        for seat in game.seats.iter_mut() {
            seat.is_connected = true;
        }
        assert!(game.start_hand());
        // A acts first (3-handed, button is UTG). Raise to 30.
        let first = game.current_actor.unwrap();
        let first_id = game.seats[first].id.clone().unwrap();
        game.player_action(&first_id, Action::Raise(30)).unwrap();
        let second = game.current_actor.unwrap();
        let second_id = game.seats[second].id.clone().unwrap();
        game.player_action(&second_id, Action::Raise(80)).unwrap();

        let third = game.current_actor.unwrap();
        let third_id = game.seats[third].id.clone().unwrap();
        game.set_seat_stack_for_testing(third, 90 - game.seats[third].current_bet);
        game.player_action(&third_id, Action::AllIn).unwrap();
        assert_eq!(game.current_bet, 90);
        assert_eq!(game.min_raise, 50); // unchanged: raiseSize 10 < minRaise 50
        assert!(game.has_acted[second]); // no reopen
    }

    #[test]
    fn fold_win_sets_fold_winner_and_skips_showdown_results() {
        let mut game = heads_up();
        assert!(game.start_hand());
        let button_seat = game.sb_pos.unwrap(); // heads-up: sb == button, acts first
        let button_id = game.seats[button_seat].id.clone().unwrap();
        game.player_action(&button_id, Action::Fold).unwrap();
        assert!(game.showdown_results.is_empty());
        let winner = game.fold_winner.expect("fold winner set");
        assert_ne!(winner, button_seat);
        let winner_id = game.seats[winner].id.clone().unwrap();
        assert!(game.player_muck_or_show(&button_id, false).is_err());
        game.player_muck_or_show(&winner_id, true).unwrap();
        assert!(game.seats[winner].show_cards);
        assert_eq!(game.stage, Stage::Idle);
    }

    #[test]
    fn bb_checking_option_ends_preflop() {
        let mut game = heads_up();
        assert!(game.start_hand());
        let sb = game.sb_pos.unwrap();
        let sb_id = game.seats[sb].id.clone().unwrap();
        game.player_action(&sb_id, Action::Call).unwrap();
        let bb = game.bb_pos.unwrap();
        assert_eq!(game.current_actor, Some(bb));
        let bb_id = game.seats[bb].id.clone().unwrap();
        game.player_action(&bb_id, Action::Check).unwrap();
        assert_eq!(game.stage, Stage::Flop);
    }

    #[test]
    fn disconnect_triggers_auto_check_or_fold() {
        let mut game = heads_up();
        assert!(game.start_hand());
        let actor = game.current_actor.unwrap();
        let id = game.seats[actor].id.clone().unwrap();
        game.set_player_connection(&id, false);
        // call-cost > 0 for the first actor preflop (SB owes the blind difference), so auto-fold.
        assert_eq!(game.seats[actor].status, Status::Folded);
    }

    #[test]
    fn side_pot_sums_to_total_contributed() {
        let mut game = Game::new(Config {
            max_seats: 3,
            small_blind: 10,
            big_blind: 20,
        });
        game.sit_player_at(0, "a", "A", 100).unwrap();
        game.sit_player_at(1, "b", "B", 300).unwrap();
        game.sit_player_at(2, "c", "C", 1000).unwrap();
        for seat in game.seats.iter_mut() {
            seat.is_connected = true;
        }
        assert!(game.start_hand());
        loop {
            let actor = match game.current_actor {
                Some(a) if game.stage != Stage::Idle && game.stage != Stage::Showdown => a,
                _ => break,
            };
            let id = game.seats[actor].id.clone().unwrap();
            let _ = game.player_action(&id, Action::AllIn);
        }
        let total_chips: Chips = game.seats.iter().map(|s| s.chips).sum();
        assert_eq!(total_chips, 100 + 300 + 1000);
    }
}
