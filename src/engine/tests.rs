use super::*;
use crate::position::Position;

fn snapshot(csv: &str) -> LevelSnapshot {
    LevelSnapshot {
        grid: Grid::from_csv(csv),
        bonus: 1000,
        lives: 5,
    }
}

fn filled(template: &str, symbol: char) -> String {
    template.replace('?', &symbol.to_string())
}

fn assert_active_sequence(start: &str, steps: &[(Dir4, &str)]) {
    let mut state = snapshot(start);
    for &(dir, expected) in steps {
        let result = state
            .active_move_result(dir)
            .expect("move should be legal");
        assert_eq!(result.snapshot.grid, Grid::from_csv(expected));
        state = result.snapshot;
    }
}

fn assert_passive_sequence(start: &str, steps: &[&str]) {
    let mut state = snapshot(start);
    for &expected in steps {
        let result = state.passive_moves_result();
        assert_eq!(result.snapshot.grid, Grid::from_csv(expected));
        state = result.snapshot;
    }
}

// Success predicate

#[test]
fn success_false_without_player() {
    assert!(!is_success(&Grid::from_csv(
        "\
.,.,.
.,G,.
.,.,."
    )));
}

#[test]
fn success_false_with_bananas_left() {
    assert!(!is_success(&Grid::from_csv(
        "\
.,G,.
b,.,b
.,M,."
    )));
}

#[test]
fn success_false_with_coins_left() {
    assert!(!is_success(&Grid::from_csv(
        "\
.,G,.
o,.,o
.,M,."
    )));
}

#[test]
fn success_false_with_attacker_beside_player() {
    for attacker in ['G', 'g'] {
        let grid = Grid::from_csv(&filled(
            "\
.,?,.
.,M,.
.,.,.",
            attacker,
        ));
        assert!(!is_success(&grid));
    }
}

#[test]
fn satiated_gorilla_beside_player_does_not_block_success() {
    assert!(is_success(&Grid::from_csv(
        "\
.,s,.
s,M,s
.,s,."
    )));
}

#[test]
fn success_true_when_cleared_and_clear_of_attackers() {
    assert!(is_success(&Grid::from_csv(
        "\
.,G,.
.,.,.
.,M,."
    )));
}

// Active moves

#[test]
fn move_off_the_grid_is_illegal() {
    let state = snapshot("M");
    for dir in Dir4::ALL {
        assert_eq!(state.active_move_result(dir), None);
    }
}

#[test]
fn move_into_blocker_is_illegal() {
    let template = "\
.,.,.,.,.
.,.,?,.,.
.,?,M,?,.
.,.,?,.,.
.,.,.,.,.";

    for blocker in ['#', 's'] {
        let state = snapshot(&filled(template, blocker));
        for dir in Dir4::ALL {
            assert_eq!(state.active_move_result(dir), None);
        }
    }
}

#[test]
fn push_against_boundary_is_illegal() {
    let template = "\
.,?,.
?,M,?
.,?,.";

    for movable in ['^', '>', 'v', '<', 'b', '='] {
        let state = snapshot(&filled(template, movable));
        for dir in Dir4::ALL {
            assert_eq!(state.active_move_result(dir), None);
        }
    }
}

#[test]
fn arrows_cannot_be_pushed_past_blockers() {
    let state = snapshot(
        "\
#,#,^,#,#
#,#,v,#,#
v,^,M,<,>
#,#,<,#,#
#,#,>,#,#",
    );
    for dir in Dir4::ALL {
        assert_eq!(state.active_move_result(dir), None);
    }
}

#[test]
fn push_into_push_blocker_is_illegal() {
    let template = "\
.,.,.,.,.,.,.,.,.,.,.
.,.,.,.,.,?,.,.,.,.,.
.,.,.,.,.,v,.,.,.,.,.
.,.,.,.,.,=,.,.,.,.,.
.,.,.,.,.,b,.,.,.,.,.
.,?,^,=,b,M,b,=,v,?,.
.,.,.,.,.,b,.,.,.,.,.
.,.,.,.,.,=,.,.,.,.,.
.,.,.,.,.,v,.,.,.,.,.
.,.,.,.,.,?,.,.,.,.,.
.,.,.,.,.,.,.,.,.,.,.";

    for blocker in ['#', 's', 'G', 'g'] {
        let state = snapshot(&filled(template, blocker));
        for dir in Dir4::ALL {
            assert_eq!(state.active_move_result(dir), None);
        }
    }
}

#[test]
fn free_moves_collect_coins() {
    assert_active_sequence(
        "\
o,o,o
M,o,o",
        &[
            (
                Dir4::Up,
                "\
M,o,o
.,o,o",
            ),
            (
                Dir4::Right,
                "\
.,M,o
.,o,o",
            ),
            (
                Dir4::Right,
                "\
.,.,M
.,o,o",
            ),
            (
                Dir4::Down,
                "\
.,.,.
.,o,M",
            ),
            (
                Dir4::Left,
                "\
.,.,.
.,M,.",
            ),
        ],
    );
}

#[test]
fn each_free_move_costs_five_bonus_floored_at_zero() {
    let state = snapshot("M,o");
    let result = state.active_move_result(Dir4::Right).unwrap();
    assert_eq!(result.snapshot.bonus, 995);

    let nearly_broke = LevelSnapshot {
        bonus: 3,
        ..snapshot("M,.")
    };
    let result = nearly_broke.active_move_result(Dir4::Right).unwrap();
    assert_eq!(result.snapshot.bonus, 0);
}

#[test]
fn four_free_moves_return_the_player_to_its_origin() {
    let start = snapshot(
        "\
M,.
.,.",
    );

    let mut state = start.clone();
    for dir in [Dir4::Right, Dir4::Down, Dir4::Left, Dir4::Up] {
        let queue = state.move_queue(dir);
        // No hazards on the grid: the active move is the whole story.
        assert_eq!(queue.len(), 1);
        assert!(queue[0].snapshot.resolved_state_results().is_empty());
        state = queue.last().unwrap().snapshot.clone();
    }

    assert_eq!(state.grid, start.grid);
    assert_eq!(state.bonus, start.bonus - 20);
    assert_eq!(state.lives, start.lives);
}

#[test]
fn push_chains_shift_one_step() {
    assert_active_sequence(
        "\
.,.,.,.,.,.,.,.,.
.,.,.,.,v,.,.,.,.
.,.,.,.,=,.,.,.,.
.,.,.,.,b,b,=,<,.
.,>,=,b,M,b,.,.,.
.,.,.,.,.,=,.,.,.
.,.,.,.,.,^,.,.,.
.,.,.,.,.,.,.,.,.",
        &[
            (
                Dir4::Up,
                "\
.,.,.,.,v,.,.,.,.
.,.,.,.,=,.,.,.,.
.,.,.,.,b,.,.,.,.
.,.,.,.,M,b,=,<,.
.,>,=,b,.,b,.,.,.
.,.,.,.,.,=,.,.,.
.,.,.,.,.,^,.,.,.
.,.,.,.,.,.,.,.,.",
            ),
            (
                Dir4::Right,
                "\
.,.,.,.,v,.,.,.,.
.,.,.,.,=,.,.,.,.
.,.,.,.,b,.,.,.,.
.,.,.,.,.,M,b,=,<
.,>,=,b,.,b,.,.,.
.,.,.,.,.,=,.,.,.
.,.,.,.,.,^,.,.,.
.,.,.,.,.,.,.,.,.",
            ),
            (
                Dir4::Down,
                "\
.,.,.,.,v,.,.,.,.
.,.,.,.,=,.,.,.,.
.,.,.,.,b,.,.,.,.
.,.,.,.,.,.,b,=,<
.,>,=,b,.,M,.,.,.
.,.,.,.,.,b,.,.,.
.,.,.,.,.,=,.,.,.
.,.,.,.,.,^,.,.,.",
            ),
            (
                Dir4::Left,
                "\
.,.,.,.,v,.,.,.,.
.,.,.,.,=,.,.,.,.
.,.,.,.,b,.,.,.,.
.,.,.,.,.,.,b,=,<
.,>,=,b,M,.,.,.,.
.,.,.,.,.,b,.,.,.
.,.,.,.,.,=,.,.,.
.,.,.,.,.,^,.,.,.",
            ),
            (
                Dir4::Left,
                "\
.,.,.,.,v,.,.,.,.
.,.,.,.,=,.,.,.,.
.,.,.,.,b,.,.,.,.
.,.,.,.,.,.,b,=,<
>,=,b,M,.,.,.,.,.
.,.,.,.,.,b,.,.,.
.,.,.,.,.,=,.,.,.
.,.,.,.,.,^,.,.,.",
            ),
        ],
    );
}

#[test]
fn push_onto_coin_overwrites_it() {
    assert_active_sequence("M,b,o", &[(Dir4::Right, ".,M,b")]);
}

#[test]
fn coins_beyond_the_chain_are_preserved() {
    assert_active_sequence("M,b,.,o", &[(Dir4::Right, ".,M,b,o")]);
}

#[test]
fn push_move_lists_player_first_then_furthest() {
    let state = snapshot("M,b,b,.");
    let result = state.active_move_result(Dir4::Right).unwrap();
    assert_eq!(
        result.moves,
        vec![
            Move::step(Position::new(0, 0), Position::new(1, 0)),
            Move::step(Position::new(2, 0), Position::new(3, 0)),
            Move::step(Position::new(1, 0), Position::new(2, 0)),
        ]
    );
}

#[test]
fn arrows_freed_by_active_move_wait_a_turn() {
    let cases = [
        (
            "\
.,.,.
>,M,<
.,^,.",
            Dir4::Up,
            "\
.,M,.
>,.,<
.,^,.",
        ),
        (
            "\
.,v,.
>,M,.
.,^,.",
            Dir4::Right,
            "\
.,v,.
>,.,M
.,^,.",
        ),
        (
            "\
.,v,.
>,M,<
.,.,.",
            Dir4::Down,
            "\
.,v,.
>,.,<
.,M,.",
        ),
        (
            "\
.,v,.
.,M,<
.,^,.",
            Dir4::Left,
            "\
.,v,.
M,.,<
.,^,.",
        ),
    ];

    for (start, dir, expected) in cases {
        assert_active_sequence(start, &[(dir, expected)]);
    }
}

// Passive turns

#[test]
fn red_gorillas_beside_player_move_onto_him() {
    assert_passive_sequence(
        "\
G,G,G
G,M,G
G,G,G",
        &["\
G,.,G
.,G,.
G,.,G"],
    );
}

#[test]
fn red_gorillas_duplicate_over_player_and_adjacent_bananas() {
    assert_passive_sequence(
        "\
.,.,b,.,.
.,b,G,b,.
b,G,M,G,b
.,b,G,b,.
.,.,b,.,.",
        &["\
.,.,G,.,.
.,G,.,G,.
G,.,G,.,G
.,G,.,G,.
.,.,G,.,."],
    );
}

#[test]
fn blue_gorillas_beside_player_satiate_on_top_of_him() {
    assert_passive_sequence(
        "\
g,g,g
g,M,g
g,g,g",
        &["\
g,.,g
.,s,.
g,.,g"],
    );
}

#[test]
fn blue_gorillas_satiate_after_moving_and_stay_still() {
    assert_passive_sequence(
        "\
g,b,b,b,g
b,g,b,g,b
b,b,M,b,b
b,g,b,g,b
g,b,b,b,g",
        &[
            "\
.,s,b,s,.
s,.,s,.,s
b,s,M,s,b
s,.,s,.,s
.,s,b,s,.",
            "\
.,s,b,s,.
s,.,s,.,s
b,s,M,s,b
s,.,s,.,s
.,s,b,s,.",
        ],
    );
}

#[test]
fn blue_gorillas_duplicate_over_player_and_adjacent_bananas() {
    assert_passive_sequence(
        "\
.,.,b,.,.
.,b,g,b,.
b,g,M,g,b
.,b,g,b,.
.,.,b,.,.",
        &["\
.,.,s,.,.
.,s,.,s,.
s,.,s,.,s
.,s,.,s,.
.,.,s,.,."],
    );
}

#[test]
fn freed_arrows_move_on_the_following_turn() {
    assert_passive_sequence(
        "\
v,.,.,G,<
G,b,.,b,.
.,.,M,.,.
.,b,.,b,G
>,G,.,.,^",
        &[
            "\
v,.,.,.,<
.,G,.,G,.
.,.,M,.,.
.,G,.,G,.
>,.,.,.,^",
            "\
.,.,.,<,.
v,G,.,G,.
.,.,M,.,.
.,G,.,G,^
.,>,.,.,.",
        ],
    );
}

#[test]
fn arrows_drift_until_the_boundary() {
    assert_passive_sequence(
        "\
v,.,<
.,M,.
>,.,^",
        &[
            "\
.,<,.
v,M,^
.,>,.",
            "\
<,.,^
.,M,.
v,.,>",
            "\
<,.,^
.,M,.
v,.,>",
        ],
    );
}

#[test]
fn arrows_stop_behind_any_occupied_cell() {
    let start = "\
M,.,.,v,.,.,.
.,.,.,.,.,.,.
.,.,.,.,.,.,.
>,.,.,?,.,.,<
.,.,.,.,.,.,.
.,.,.,.,.,.,.
.,.,.,^,.,.,.";
    let steps = [
        "\
M,.,.,.,.,.,.
.,.,.,v,.,.,.
.,.,.,.,.,.,.
.,>,.,?,.,<,.
.,.,.,.,.,.,.
.,.,.,^,.,.,.
.,.,.,.,.,.,.",
        "\
M,.,.,.,.,.,.
.,.,.,.,.,.,.
.,.,.,v,.,.,.
.,.,>,?,<,.,.
.,.,.,^,.,.,.
.,.,.,.,.,.,.
.,.,.,.,.,.,.",
        "\
M,.,.,.,.,.,.
.,.,.,.,.,.,.
.,.,.,v,.,.,.
.,.,>,?,<,.,.
.,.,.,^,.,.,.
.,.,.,.,.,.,.
.,.,.,.,.,.,.",
    ];

    for obstruction in ['M', 'o', 'b', 'G', 'g', 's', '=', '#'] {
        let expected: Vec<String> = steps.iter().map(|s| filled(s, obstruction)).collect();
        let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
        assert_passive_sequence(&filled(start, obstruction), &expected);
    }
}

#[test]
fn colliding_arrows_become_red_blocks() {
    assert_passive_sequence(
        "\
M,v,.,v,.,v,.
>,.,>,.,<,.,<
>,v,<,v,v,v,v
>,.,>,.,<,.,<
>,^,<,^,^,^,^
>,.,>,.,<,.,<
.,^,.,^,.,^,.",
        &[
            "\
M,.,.,.,.,.,.
.,#,.,#,.,#,.
>,.,<,.,v,.,v
.,#,.,#,.,#,.
>,.,<,.,^,.,^
.,#,.,#,.,#,.
.,.,.,.,.,.,.",
            "\
M,.,.,.,.,.,.
.,#,.,#,.,#,.
.,#,.,.,.,.,.
.,#,.,#,#,#,#
.,#,.,.,.,.,.
.,#,.,#,.,#,.
.,.,.,.,.,.,.",
        ],
    );
}

#[test]
fn passive_turns_preserve_bonus_and_lives() {
    let state = snapshot(
        "\
G,G,G
G,M,G
G,G,G",
    );
    let result = state.passive_moves_result();
    assert_eq!(result.snapshot.bonus, state.bonus);
    assert_eq!(result.snapshot.lives, state.lives);
}

// Full resolution

#[test]
fn stable_grid_resolves_to_an_empty_queue() {
    // Satiated gorillas and blocked arrows never move again.
    let state = snapshot(
        "\
s,#,^
o,M,b
.,s,<",
    );
    assert!(state.resolved_state_results().is_empty());
    assert_eq!(
        state.passive_moves_result().snapshot.grid,
        state.grid,
        "passive turn should be the identity here"
    );
}

#[test]
fn illegal_move_returns_an_empty_queue() {
    let state = snapshot("M,#");
    assert!(state.move_queue(Dir4::Right).is_empty());
}

#[test]
fn capture_decrements_lives_exactly_once() {
    let state = snapshot("M,.,G,o");
    let queue = state.move_queue(Dir4::Right);

    // Active step, then the gorilla's capture turn carrying the life loss.
    assert_eq!(queue.len(), 2);
    let last = queue.last().unwrap();
    assert!(is_player_dead(&last.snapshot.grid));
    assert_eq!(last.snapshot.lives, 4);
    assert_eq!(last.snapshot.bonus, 995);
    assert_eq!(last.snapshot.grid, Grid::from_csv(".,G,.,o"));
}

#[test]
fn success_state_is_appended_exactly_once() {
    let state = snapshot("M,.,.,g,b");
    let queue = state.move_queue(Dir4::Right);

    assert_eq!(queue.len(), 2);
    assert!(is_success(&queue[1].snapshot.grid));
    assert_eq!(queue[1].snapshot.grid, Grid::from_csv(".,M,.,.,s"));
    assert_eq!(
        queue
            .iter()
            .filter(|t| is_success(&t.snapshot.grid))
            .count(),
        1
    );
}

#[test]
fn immediate_success_skips_passive_resolution() {
    let state = snapshot("M,o");
    let queue = state.move_queue(Dir4::Right);

    assert_eq!(queue.len(), 1);
    assert!(is_success(&queue[0].snapshot.grid));
    assert_eq!(queue[0].snapshot.bonus, 995);
    assert_eq!(queue[0].snapshot.lives, 5);
}

#[test]
fn resolution_reports_each_wave_separately() {
    // One arrow with a two-cell runway: two passive turns, one entry each.
    let state = snapshot(">,.,.\nM,.,o");
    let queue = state.move_queue(Dir4::Right);

    assert_eq!(queue.len(), 3);
    assert_eq!(queue[0].snapshot.grid, Grid::from_csv(">,.,.\n.,M,o"));
    assert_eq!(queue[1].snapshot.grid, Grid::from_csv(".,>,.\n.,M,o"));
    assert_eq!(queue[2].snapshot.grid, Grid::from_csv(".,.,>\n.,M,o"));
}

#[test]
#[should_panic(expected = "no player cell found")]
fn active_move_without_a_player_is_a_defect() {
    let state = snapshot(".,G");
    let _ = state.active_move_result(Dir4::Right);
}
