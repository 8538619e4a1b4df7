//! Game session integration tests: board sync, turn flow, player actions.

mod common;

use std::sync::Arc;

use card_duel_client::core::{Address, CardRef, ClientConfig, MoveArg, Seat};
use card_duel_client::error::ErrorKind;
use card_duel_client::lobby::Route;
use card_duel_client::session::GameSession;
use card_duel_client::turn::{ClickIntent, TurnPhase};
use card_duel_client::zones::{BackendPlayers, PlayerBackendView};

use common::{
    card_object, cards_arg, config, game_object, player_fields, FakeBackend, FakeChain, FakeWallet,
};

const GAME: &str = "0x77";

struct World {
    chain: Arc<FakeChain>,
    wallet: Arc<FakeWallet>,
    backend: Arc<FakeBackend>,
    config: ClientConfig,
}

impl World {
    fn new(local: &str, config: ClientConfig) -> Self {
        Self {
            chain: FakeChain::new(),
            wallet: FakeWallet::new(local),
            backend: Arc::new(FakeBackend::default()),
            config,
        }
    }

    fn session(&self) -> GameSession {
        GameSession::new(
            self.config.clone(),
            self.chain.clone(),
            self.wallet.clone(),
            self.backend.clone(),
            GAME,
        )
    }

    /// Make every listed card fetchable.
    fn stock(&self, ids: &[&str]) {
        for id in ids {
            self.chain.put(card_object(id, &id.to_uppercase(), 2, 1));
        }
    }

    fn lists(&self, p1: (&[&str], &[&str]), p2: (&[&str], &[&str])) {
        self.backend.set_players(BackendPlayers::new(
            PlayerBackendView::new("0xA").with_hand(refs(p1.0)).with_deck(refs(p1.1)),
            PlayerBackendView::new("0xB").with_hand(refs(p2.0)).with_deck(refs(p2.1)),
        ));
    }

    fn game(&self, p1_board: &[&str], p2_board: &[&str], p1_turn: Option<bool>) {
        self.hold_game("0xA", p1_board, p2_board, p1_turn);
    }

    /// Put the game object in `holder`'s owned objects and nowhere else.
    fn hold_game(
        &self,
        holder: &str,
        p1_board: &[&str],
        p2_board: &[&str],
        p1_turn: Option<bool>,
    ) {
        for owner in ["0xA", "0xB"] {
            self.chain.set_owned(owner, Vec::new());
        }
        self.chain.set_owned(
            holder,
            vec![game_object(
                GAME,
                player_fields("0xA", p1_board, &[], 20),
                Some(player_fields("0xB", p2_board, &[], 18)),
                p1_turn,
            )],
        );
    }
}

fn refs(ids: &[&str]) -> Vec<CardRef> {
    ids.iter().map(|id| CardRef::new(*id)).collect()
}

fn names(cards: &im::Vector<card_duel_client::cards::Card>) -> Vec<String> {
    cards.iter().map(|card| card.id.as_str().to_owned()).collect()
}

/// Refresh, wait for card fetches, refresh again so snapshots are complete.
async fn synced(session: &mut GameSession) {
    session.refresh().await.unwrap();
    session.settle_cards().await;
    session.refresh().await.unwrap();
}

// =============================================================================
// Board synchronization
// =============================================================================

#[tokio::test]
async fn test_cards_resolve_on_a_later_cycle() {
    let world = World::new("0xA", config());
    world.stock(&["a", "b"]);
    world.lists((&["a", "b"], &[]), (&[], &[]));
    world.game(&[], &[], Some(true));
    let mut session = world.session();

    session.refresh().await.unwrap();
    assert!(session.board().unwrap().players[Seat::One].hand.is_empty());

    session.settle_cards().await;
    session.refresh().await.unwrap();

    let board = session.board().unwrap();
    assert_eq!(names(&board.players[Seat::One].hand), vec!["a", "b"]);
    assert_eq!(world.chain.fetch_count("a"), 1);
    assert_eq!(world.chain.fetch_count("b"), 1);
}

#[tokio::test]
async fn test_snapshot_merges_chain_and_backend() {
    let world = World::new("0xB", config());
    world.stock(&["h", "d", "x", "y"]);
    world.lists((&[], &[]), (&["h", "d"], &["d"]));
    world.game(&["x"], &["y"], Some(true));
    let mut session = world.session();

    synced(&mut session).await;

    assert_eq!(session.local_seat(), Some(Seat::Two));
    let board = session.board().unwrap();
    let two = &board.players[Seat::Two];
    assert_eq!(two.address, Address::new("0xB"));
    assert_eq!(two.life, 18);
    assert_eq!(two.deck_size, 15);
    assert_eq!(names(&two.hand), vec!["h", "d"]);
    // A card listed in both hand and deck only shows in the hand.
    assert!(two.deck.is_empty());
    assert_eq!(names(&two.board), vec!["y"]);
    assert_eq!(names(&board.players[Seat::One].board), vec!["x"]);
}

#[tokio::test]
async fn test_missing_game_is_logical_error() {
    let world = World::new("0xA", config());
    world.lists((&[], &[]), (&[], &[]));
    let mut session = world.session();

    let err = session.refresh().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LogicalState);
    assert!(session.board().is_none());

    // A tick logs the failure and does nothing else.
    session.tick().await;
    assert!(session.board().is_none());
    assert!(world.wallet.calls.lock().is_empty());
}

#[tokio::test]
async fn test_wallet_in_neither_seat_is_logical_error() {
    let world = World::new("0xZ", config());
    world.lists((&[], &[]), (&[], &[]));
    world.game(&[], &[], None);
    let mut session = world.session();

    let err = session.refresh().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LogicalState);
    assert_eq!(session.local_seat(), None);
}

#[tokio::test]
async fn test_cancelled_session_drops_poll_results() {
    let world = World::new("0xA", config());
    world.stock(&["a", "b"]);
    world.lists((&["a"], &[]), (&[], &[]));
    world.game(&[], &[], Some(true));
    let mut session = world.session();
    synced(&mut session).await;

    session.cancellation_token().cancel();
    world.lists((&["a", "b"], &[]), (&[], &[]));
    session.refresh().await.unwrap();

    let view = &session.board().unwrap().views[Seat::One];
    assert_eq!(view.hand, refs(&["a"]));

    // Ticks after cancellation never act.
    session.tick().await;
    session.run().await;
    assert!(world.wallet.calls.lock().is_empty());
}

// =============================================================================
// Turn flow
// =============================================================================

#[tokio::test]
async fn test_full_turn_with_forced_discard() {
    let world = World::new("0xA", config().with_max_hand_size(5));
    world.stock(&["h1", "h2", "h3", "h4", "d1", "d2", "d3", "b1", "x1"]);
    world.lists((&["h1", "h2", "h3", "h4"], &["d1", "d2", "d3"]), (&[], &[]));
    world.game(&["b1"], &["x1"], Some(true));
    let mut session = world.session();
    synced(&mut session).await;

    // Hand reaches the limit after the draw: discard next.
    session.tick().await;
    assert_eq!(session.phase(), Some(TurnPhase::Discard));
    assert!(!session.can_end_turn());
    let draw = world.wallet.last_call().unwrap();
    assert_eq!(draw.function(), "draw");
    assert_eq!(draw.arguments[1], MoveArg::Bool(true));

    // Further ticks do not draw again.
    session.tick().await;
    assert_eq!(world.wallet.count("draw"), 1);

    let intent = session.click_card(&CardRef::new("h1")).await.unwrap();
    assert_eq!(intent, ClickIntent::Discard(CardRef::new("h1")));
    assert_eq!(session.phase(), Some(TurnPhase::Play));

    let intent = session.click_card(&CardRef::new("h2")).await.unwrap();
    assert_eq!(intent, ClickIntent::Play(CardRef::new("h2")));
    assert_eq!(session.phase(), Some(TurnPhase::Attack));

    assert_eq!(
        session.click_card(&CardRef::new("h3")).await.unwrap(),
        ClickIntent::Ignore
    );
    session.click_card(&CardRef::new("b1")).await.unwrap();
    session.click_card(&CardRef::new("x1")).await.unwrap();
    assert_eq!(session.selection().attackers, refs(&["b1"]));
    assert_eq!(session.selection().defenders, refs(&["x1"]));

    session.declare_attack().await.unwrap();
    let attack = world.wallet.last_call().unwrap();
    assert_eq!(cards_arg(&attack, 2), vec!["b1"]);
    assert_eq!(cards_arg(&attack, 3), vec!["x1"]);
    assert!(session.selection().is_empty());
    assert_eq!(session.phase(), Some(TurnPhase::Idle));
    assert!(session.can_end_turn());

    // Back in Idle after the attack: no second draw this turn.
    session.tick().await;
    assert_eq!(world.wallet.count("draw"), 1);

    session.end_turn().await.unwrap();
    assert_eq!(session.controller().unwrap().active(), Seat::Two);
    assert_eq!(
        world.wallet.functions(),
        vec!["draw", "discard", "play", "attack", "end_turn"]
    );
}

#[tokio::test]
async fn test_small_hand_skips_discard() {
    let world = World::new("0xA", config().with_max_hand_size(5));
    world.stock(&["h1", "h2", "d1"]);
    world.lists((&["h1", "h2"], &["d1"]), (&[], &[]));
    world.game(&[], &[], Some(true));
    let mut session = world.session();
    synced(&mut session).await;

    session.tick().await;
    assert_eq!(session.phase(), Some(TurnPhase::Play));
    assert!(session.can_end_turn());
}

#[tokio::test]
async fn test_failed_draw_is_retried_next_tick() {
    let world = World::new("0xA", config());
    world.lists((&[], &["d1"]), (&[], &[]));
    world.game(&[], &[], Some(true));
    world.wallet.fail("draw");
    let mut session = world.session();

    session.tick().await;
    assert_eq!(session.phase(), Some(TurnPhase::Idle));
    assert!(session.controller().unwrap().is_local_turn());

    world.wallet.recover("draw");
    session.tick().await;
    assert_eq!(world.wallet.count("draw"), 1);
    assert_eq!(session.phase(), Some(TurnPhase::Play));
}

#[tokio::test]
async fn test_player_two_draws_when_chain_hands_over() {
    let world = World::new("0xB", config());
    world.lists((&[], &[]), (&[], &["d1"]));
    world.game(&[], &[], Some(true));
    let mut session = world.session();

    session.tick().await;
    assert_eq!(session.phase(), Some(TurnPhase::Idle));
    assert!(world.wallet.calls.lock().is_empty());

    world.game(&[], &[], Some(false));
    session.tick().await;

    let draw = world.wallet.last_call().unwrap();
    assert_eq!(draw.function(), "draw");
    assert_eq!(draw.arguments[1], MoveArg::Bool(false));
    assert_eq!(session.phase(), Some(TurnPhase::Play));
}

#[tokio::test]
async fn test_player_two_draws_when_game_object_moves_to_them() {
    let world = World::new("0xB", config());
    world.lists((&[], &[]), (&[], &["d1"]));
    world.hold_game("0xA", &[], &[], None);
    let mut session = world.session();

    session.tick().await;
    assert_eq!(session.controller().unwrap().active(), Seat::One);
    assert!(world.wallet.calls.lock().is_empty());

    world.hold_game("0xB", &[], &[], None);
    for _ in 0..3 {
        session.tick().await;
    }

    assert_eq!(session.controller().unwrap().active(), Seat::Two);
    assert_eq!(world.wallet.count("draw"), 1);
    assert_eq!(session.phase(), Some(TurnPhase::Play));
}

#[tokio::test]
async fn test_lagging_game_holder_does_not_undo_end_turn() {
    let world = World::new("0xA", config());
    world.lists((&[], &["d1", "d2"]), (&[], &[]));
    world.hold_game("0xA", &[], &[], None);
    let mut session = world.session();

    session.tick().await;
    session.end_turn().await.unwrap();

    // Object still held by player 1: the end-turn stands.
    session.tick().await;
    assert!(!session.controller().unwrap().is_local_turn());
    assert_eq!(world.wallet.count("draw"), 1);

    world.hold_game("0xB", &[], &[], None);
    session.tick().await;
    world.hold_game("0xA", &[], &[], None);
    session.tick().await;
    assert_eq!(world.wallet.count("draw"), 2);
}

#[tokio::test]
async fn test_stale_turn_flag_does_not_undo_end_turn() {
    let world = World::new("0xA", config());
    world.lists((&[], &["d1", "d2"]), (&[], &[]));
    world.game(&[], &[], Some(true));
    let mut session = world.session();

    session.tick().await;
    session.end_turn().await.unwrap();

    // Chain still reports player 1's turn: nothing happens.
    session.tick().await;
    assert_eq!(world.wallet.count("draw"), 1);
    assert!(!session.controller().unwrap().is_local_turn());

    // Opponent's turn observed, then ours again: draw once more.
    world.game(&[], &[], Some(false));
    session.tick().await;
    world.game(&[], &[], Some(true));
    session.tick().await;
    assert_eq!(world.wallet.count("draw"), 2);
}

// =============================================================================
// Action guards
// =============================================================================

#[tokio::test]
async fn test_actions_rejected_outside_their_phase() {
    let world = World::new("0xA", config().with_max_hand_size(1));
    world.lists((&["h1"], &["d1"]), (&[], &[]));
    world.game(&[], &[], Some(true));
    let mut session = world.session();

    session.tick().await;
    assert_eq!(session.phase(), Some(TurnPhase::Discard));

    let err = session.end_turn().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LogicalState);
    let err = session.declare_attack().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LogicalState);
    assert_eq!(world.wallet.functions(), vec!["draw"]);
}

#[tokio::test]
async fn test_clicks_ignored_while_opponent_acts() {
    let world = World::new("0xB", config());
    world.stock(&["h1"]);
    world.lists((&[], &[]), (&["h1"], &[]));
    world.game(&[], &[], Some(true));
    let mut session = world.session();

    assert_eq!(
        session.click_card(&CardRef::new("h1")).await.unwrap(),
        ClickIntent::Ignore
    );
    synced(&mut session).await;
    assert_eq!(
        session.click_card(&CardRef::new("h1")).await.unwrap(),
        ClickIntent::Ignore
    );
    assert!(world.wallet.calls.lock().is_empty());
}

#[tokio::test]
async fn test_rejected_play_keeps_phase() {
    let world = World::new("0xA", config());
    world.stock(&["h1", "d1"]);
    world.lists((&["h1"], &["d1"]), (&[], &[]));
    world.game(&[], &[], Some(true));
    world.wallet.fail("play");
    let mut session = world.session();
    synced(&mut session).await;

    session.tick().await;
    assert_eq!(session.phase(), Some(TurnPhase::Play));

    let err = session.click_card(&CardRef::new("h1")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Chain);
    assert_eq!(session.phase(), Some(TurnPhase::Play));
}

#[tokio::test]
async fn test_surrender_returns_to_lobby_and_stops() {
    let world = World::new("0xA", config());
    world.lists((&[], &[]), (&[], &[]));
    world.game(&[], &[], Some(true));
    let mut session = world.session();
    assert_eq!(session.route(), Route::Game(GAME.into()));

    let route = session.surrender().await.unwrap();
    assert_eq!(route, Route::Lobby);
    assert_eq!(route.to_string(), "/");
    assert!(session.is_cancelled());

    session.run().await;
    assert_eq!(world.wallet.functions(), vec!["surrender"]);
}
