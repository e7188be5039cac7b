use rand::{rngs::StdRng, SeedableRng};

use crate::{
    ai::{Minimax, WIN_VALUE},
    core::{BoardSpec, Loc, State},
};

/// Exact game value for the player to move, +1 for a forced win
fn solve(state: &State) -> i32 {
    if state.terminal_test() {
        return state.utility(state.player()).unwrap();
    }
    state
        .actions()
        .into_iter()
        .map(|action| -solve(&state.result(action).unwrap()))
        .max()
        .unwrap()
}

fn winning_actions(state: &State) -> Vec<Loc> {
    state
        .actions()
        .into_iter()
        .filter(|&action| solve(&state.result(action).unwrap()) < 0)
        .collect()
}

fn check_against_solver(state: &State) {
    let expected = solve(state);
    let result = Minimax::default().search(state, 32).unwrap();

    assert!(result.completed);
    assert_eq!(result.value, expected * WIN_VALUE, "position {}", state.to_notation());

    let winners = winning_actions(state);
    if winners.is_empty() {
        assert_eq!(expected, -1);
    } else {
        assert!(winners.contains(&result.action), "position {}", state.to_notation());
    }
}

#[test]
fn test_full_depth_search_solves_3x3() {
    let board = BoardSpec::new(3, 3).unwrap();
    check_against_solver(&State::new(board));
}

#[test]
fn test_full_depth_search_after_every_3x3_opening() {
    let start = State::new(BoardSpec::new(3, 3).unwrap());
    for action in start.actions() {
        let state = start.result(action).unwrap();
        check_against_solver(&state);
    }
}

#[test]
fn test_full_depth_search_on_4x4_midgames() {
    let board = BoardSpec::new(4, 4).unwrap();

    for seed in 0..12 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = State::new(board);

        while state.ply_count() < 7 && !state.terminal_test() {
            let action = state.random_action(&mut rng).unwrap();
            state = state.result(action).unwrap();
        }

        if !state.terminal_test() {
            check_against_solver(&state);
        }
    }
}

#[test]
fn test_shallow_search_prefers_mobility() {
    // at depth 1 the value is the heuristic score of the best child
    let state = State::default().result(Loc::new(5, 4)).unwrap();
    let result = Minimax::default().search(&state, 1).unwrap();

    let best = state
        .actions()
        .into_iter()
        .map(|action| {
            let child = state.result(action).unwrap();
            child.count_liberties(child.loc(state.player())) as i32
                - child.count_liberties(child.loc(!state.player())) as i32
        })
        .max()
        .unwrap();
    assert_eq!(result.value, best);
}
