use std::collections::VecDeque;

use macroquad::time::get_frame_time;

use crate::config::{
    ACTIVE_MOVE_DURATION, ACTIVE_MOVE_EASING, Easing, PASSIVE_MOVE_DURATION, PASSIVE_MOVE_EASING,
    POINTS_PER_LEVEL, START_BONUS, START_LIVES,
};
use crate::engine::{LevelSnapshot, StateTransition, is_player_dead, is_success};
use crate::grid::Grid;
use crate::input::{Input, InputState};
use crate::levels::{self, Level, LevelType};
use crate::render::{self, Hud, MovingCell};
use crate::screen::{self, LevelOutcome, Screen};
use crate::storage::{self, SavedData};

/// The level list the game plays through. The file also carries community
/// levels under their own key; they parse and get passwords like any other
/// but are not part of the campaign.
const CAMPAIGN: LevelType = LevelType::Original;

/// Linear history of resolved level states. Undoing at the bottom re-yields
/// the entry state; pushing after an undo discards the redo branch.
struct UndoStack {
    list: Vec<LevelSnapshot>,
    pos: usize,
}

impl UndoStack {
    fn new() -> Self {
        Self {
            list: Vec::new(),
            pos: 0,
        }
    }

    fn push(&mut self, snapshot: LevelSnapshot) {
        self.list.truncate(self.pos + 1);
        self.list.push(snapshot);
        self.pos = self.list.len() - 1;
    }

    fn undo(&mut self) -> Option<LevelSnapshot> {
        self.pos = self.pos.saturating_sub(1);
        self.list.get(self.pos).cloned()
    }

    fn redo(&mut self) -> Option<LevelSnapshot> {
        self.pos = (self.pos + 1).min(self.list.len().saturating_sub(1));
        self.list.get(self.pos).cloned()
    }
}

/// One transition being played back: the grid it started from, the target
/// state, and the clock.
struct Animation {
    base: Grid,
    transition: StateTransition,
    elapsed: f32,
    duration: f32,
    easing: Easing,
}

struct LevelPlay {
    level: &'static Level,
    /// Score on entering the level; it only changes between levels.
    score: u32,
    state: LevelSnapshot,
    pending: VecDeque<StateTransition>,
    animation: Option<Animation>,
    undo: Option<UndoStack>,
    next_is_active: bool,
}

impl LevelPlay {
    fn is_idle(&self) -> bool {
        self.animation.is_none() && self.pending.is_empty()
    }

    fn enqueue(&mut self, queue: Vec<StateTransition>, first_is_active: bool) {
        self.pending = queue.into();
        self.next_is_active = first_is_active;
    }

    fn begin_next(&mut self) {
        let Some(transition) = self.pending.pop_front() else {
            return;
        };
        let (duration, easing) = if self.next_is_active {
            (ACTIVE_MOVE_DURATION, ACTIVE_MOVE_EASING)
        } else {
            (PASSIVE_MOVE_DURATION, PASSIVE_MOVE_EASING)
        };
        self.next_is_active = false;
        self.animation = Some(Animation {
            base: self.state.grid.clone(),
            transition,
            elapsed: 0.0,
            duration,
            easing,
        });
    }

    /// Advance playback by `dt`, rolling leftover time into the next queued
    /// transition. Returns true the moment the queue fully drains.
    fn advance(&mut self, mut dt: f32) -> bool {
        loop {
            if self.animation.is_none() {
                if self.pending.is_empty() {
                    return false;
                }
                self.begin_next();
            }
            let animation = self.animation.as_mut().unwrap();
            animation.elapsed += dt;
            if animation.elapsed < animation.duration {
                return false;
            }
            dt = animation.elapsed - animation.duration;
            let animation = self.animation.take().unwrap();
            self.state = animation.transition.snapshot;
            if self.pending.is_empty() {
                return true;
            }
        }
    }

    fn moving_cells(&self) -> Vec<MovingCell> {
        let Some(animation) = &self.animation else {
            return Vec::new();
        };
        let progress = animation
            .easing
            .apply(animation.elapsed / animation.duration);

        let mut moving = Vec::new();
        for m in &animation.transition.moves {
            let Some(cell) = animation.base.at(m.from) else {
                continue;
            };
            for &to in &m.to {
                moving.push(MovingCell {
                    cell,
                    from: m.from,
                    to,
                    progress,
                });
            }
        }
        moving
    }
}

pub struct App {
    screen: Screen,
    saved: SavedData,
    input: InputState,
    play: Option<LevelPlay>,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Title,
            saved: storage::load(),
            input: InputState::new(),
            play: None,
        }
    }

    /// Run one frame. Returns false when the game should exit.
    pub fn tick(&mut self) -> bool {
        let dt = get_frame_time();

        for input in self.input.poll(dt) {
            if !self.handle_input(input) {
                return false;
            }
        }

        if self.screen == Screen::Level
            && let Some(play) = &mut self.play
            && play.advance(dt)
        {
            self.settle_level();
        }

        self.render();
        true
    }

    fn enter_level(&mut self, level: &'static Level, score: u32, lives: u32) {
        let every = self.saved.profile().password_every();
        let checkpoint = levels::checkpoint_password(level.level_type, level.stage, every);
        // The first level's code is free; only persist codes the player earned.
        if checkpoint != levels::first_level(level.level_type).password {
            self.saved.set_last_password(checkpoint);
            storage::save(&self.saved);
        }

        let state = LevelSnapshot {
            grid: level.grid.clone(),
            bonus: START_BONUS,
            lives,
        };
        // Hazards that can act before the first input do so on entry.
        let pending = state.resolved_state_results();

        let mut play = LevelPlay {
            level,
            score,
            state,
            pending: VecDeque::new(),
            animation: None,
            undo: self.saved.profile().undo_enabled().then(UndoStack::new),
            next_is_active: false,
        };
        play.enqueue(pending, false);
        // Undo bottoms out at the pre-input state; a non-empty entry queue
        // records it when it drains instead.
        if play.pending.is_empty()
            && let Some(undo) = &mut play.undo
        {
            undo.push(play.state.clone());
        }

        self.play = Some(play);
        self.screen = Screen::Level;
        self.input.reset();
    }

    /// The queue has drained: decide where the level goes from here.
    fn settle_level(&mut self) {
        let play = self.play.as_mut().expect("level screen without level play");

        match screen::level_outcome(&play.state.grid, play.state.lives) {
            LevelOutcome::Playing => {
                let snapshot = play.state.clone();
                if let Some(undo) = &mut play.undo {
                    undo.push(snapshot);
                }
            }
            LevelOutcome::GameOver => self.game_over(),
            LevelOutcome::Retry => self.screen = Screen::RetryQuery,
            LevelOutcome::Complete => {
                let password = play.level.password.clone();
                let bonus = play.state.bonus;
                let new_score = play.score + POINTS_PER_LEVEL + bonus;
                let previous_score = play.score;

                self.saved.record_bonus(&password, bonus);
                storage::save(&self.saved);
                self.screen = Screen::LevelComplete {
                    previous_score,
                    new_score,
                };
            }
        }
    }

    fn game_over(&mut self) {
        let play = self.play.as_ref().expect("level screen without level play");
        let every = self.saved.profile().password_every();
        let password =
            levels::checkpoint_password(play.level.level_type, play.level.stage, every).to_string();
        self.screen = Screen::GameOver { password };
    }

    /// Escape costs a life and offers a retry, exactly like a capture.
    fn abort_level(&mut self) {
        let play = self.play.as_mut().expect("level screen without level play");
        if is_player_dead(&play.state.grid) || is_success(&play.state.grid) {
            return;
        }
        play.pending.clear();
        play.animation = None;
        play.state.lives = play.state.lives.saturating_sub(1);

        if play.state.lives == 0 {
            self.game_over();
        } else {
            self.screen = Screen::RetryQuery;
        }
    }

    fn handle_input(&mut self, input: Input) -> bool {
        match self.screen.clone() {
            Screen::Title => match input {
                Input::ToggleProfile => {
                    self.saved.toggle_profile();
                    storage::save(&self.saved);
                }
                Input::Confirm => self.screen = Screen::UsePasswordQuery,
                Input::Cancel => return false,
                _ => {}
            },
            Screen::UsePasswordQuery => match input {
                Input::Digit(1) => {
                    self.screen = Screen::PasswordInput {
                        input: self.saved.last_password().unwrap_or_default().to_string(),
                    };
                }
                Input::Digit(2) => {
                    self.enter_level(levels::first_level(CAMPAIGN), 0, START_LIVES);
                }
                _ => {}
            },
            Screen::PasswordInput { input: mut code } => {
                match input {
                    Input::Digit(d) => screen::push_password_digit(&mut code, d),
                    Input::Backspace => {
                        code.pop();
                    }
                    Input::Move(dir) => match dir {
                        crate::direction::Dir4::Up => screen::cycle_password_digit(&mut code, true),
                        crate::direction::Dir4::Down => {
                            screen::cycle_password_digit(&mut code, false)
                        }
                        _ => {}
                    },
                    Input::Confirm => {
                        if let Some(level) = levels::find_by_password(CAMPAIGN, &code) {
                            self.enter_level(level, 0, START_LIVES);
                            return true;
                        }
                    }
                    Input::Cancel => {
                        self.enter_level(levels::first_level(CAMPAIGN), 0, START_LIVES);
                        return true;
                    }
                    _ => {}
                }
                self.screen = Screen::PasswordInput { input: code };
            }
            Screen::Level => self.handle_level_input(input),
            Screen::RetryQuery => {
                if input == Input::Confirm {
                    let play = self.play.as_ref().expect("retry without level play");
                    let (level, score, lives) = (play.level, play.score, play.state.lives);
                    self.enter_level(level, score, lives);
                }
            }
            Screen::LevelComplete {
                previous_score,
                new_score,
            } => match input {
                Input::Digit(1) => {
                    let play = self.play.as_ref().expect("complete without level play");
                    let (level, lives) = (play.level, play.state.lives);
                    self.enter_level(level, previous_score, lives);
                }
                Input::Digit(2) => {
                    let play = self.play.as_ref().expect("complete without level play");
                    let level_type = play.level.level_type;
                    let (stage, lives) = (play.level.stage, play.state.lives);
                    match levels::find_by_stage(level_type, stage + 1) {
                        Some(next) => {
                            let lives =
                                screen::lives_after_level_gain(lives, previous_score, new_score);
                            self.enter_level(next, new_score, lives);
                        }
                        None => {
                            self.saved.record_total_score(level_type, new_score);
                            storage::save(&self.saved);
                            self.play = None;
                            self.screen = Screen::GameComplete { score: new_score };
                        }
                    }
                }
                _ => {}
            },
            Screen::GameOver { .. } | Screen::GameComplete { .. } => {
                if input == Input::Confirm {
                    self.play = None;
                    self.screen = Screen::Title;
                }
            }
        }
        true
    }

    fn handle_level_input(&mut self, input: Input) {
        if input == Input::Cancel {
            self.abort_level();
            return;
        }

        let play = self.play.as_mut().expect("level screen without level play");
        // Playback owns the state until the queue drains.
        if !play.is_idle() {
            return;
        }

        match input {
            Input::Move(dir) => {
                let queue = play.state.move_queue(dir);
                if !queue.is_empty() {
                    play.enqueue(queue, true);
                }
            }
            Input::Undo => {
                if let Some(recovered) = play.undo.as_mut().and_then(UndoStack::undo) {
                    play.state = recovered;
                }
            }
            Input::Redo => {
                if let Some(recovered) = play.undo.as_mut().and_then(UndoStack::redo) {
                    play.state = recovered;
                }
            }
            _ => {}
        }
    }

    fn render(&self) {
        match &self.screen {
            Screen::Title => {
                render::render_title(self.saved.profile(), self.saved.best_total_score(CAMPAIGN));
            }
            Screen::UsePasswordQuery => {
                render::render_background();
                render::render_dialog(&["AVEZ-VOUS UN", "CODE D'ACCES?", "1-OUI   2-NON"]);
            }
            Screen::PasswordInput { input } => {
                render::render_background();
                let shown = format!("{:.<6}", input);
                render::render_dialog(&["ENTREZ VOTRE", "CODE D'ACCES", &shown]);
            }
            Screen::Level => {
                if let Some(play) = &self.play {
                    let grid = match &play.animation {
                        Some(animation) => &animation.base,
                        None => &play.state.grid,
                    };
                    let hud = Hud {
                        score: play.score,
                        bonus: play.state.bonus,
                        stage: play.level.stage,
                        lives: play.state.lives,
                    };
                    render::render_level(grid, &play.moving_cells(), &hud);
                }
            }
            Screen::RetryQuery => {
                render::render_background();
                render::render_dialog(&["ESSAYEZ ENCORE!", "", "APPUYEZ SUR ESPACE"]);
            }
            Screen::LevelComplete { .. } => {
                render::render_background();
                let best = self
                    .play
                    .as_ref()
                    .map(|play| self.saved.best_bonus(&play.level.password))
                    .unwrap_or(0);
                let best_line = format!("MEILLEUR ESSAI: {:0>4}", best);
                render::render_dialog(&[
                    &best_line,
                    "1-REESSAYER CE NIVEAU",
                    "2-NIVEAU SUIVANT",
                ]);
            }
            Screen::GameOver { password } => {
                render::render_background();
                let code_line = format!("CODE D'ACCES: {}", password);
                render::render_dialog(&["VOICI VOTRE", &code_line, "APPUYEZ SUR ESPACE"]);
            }
            Screen::GameComplete { score } => {
                render::render_background();
                let score_line = format!("VOTRE SCORE: {:0>6}", score);
                let best_line = format!(
                    "MEILLEUR SCORE: {:0>6}",
                    self.saved.best_total_score(CAMPAIGN)
                );
                render::render_dialog(&["FELICITATIONS!", &score_line, &best_line]);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
