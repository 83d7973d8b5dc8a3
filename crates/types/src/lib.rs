//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by both simulations and by
//! every presentation layer. All types are plain data with no dependencies.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `NOMINAL_FRAME_MS` | 16.67 | One 60fps frame; the unit of a normalized delta |
//! | `MAX_FRAME_DELTA` | 3.0 | Largest normalized delta a single frame may apply |
//! | `BASE_DROP_MS` | 800 | Auto-drop interval at speed multiplier 1 |
//! | `COUNTDOWN_STEP_MS` | 1000 | Gap between countdown labels |
//! | `COUNTDOWN_LAUNCH_MS` | 500 | Gap between the last label and the run start |
//! | `GAME_OVER_DISPLAY_MS` | 6000 | Results screen duration before the menu returns |
//!
//! # Difficulty Presets
//!
//! | Preset | Lanes | Base speed | Spawn interval |
//! |--------|-------|------------|----------------|
//! | Easy | 3 | 2.8 | 1800ms |
//! | Normal | 4 | 3.6 | 1400ms |
//! | Hard | 5 | 4.4 | 1000ms |
//!
//! # Examples
//!
//! ```
//! use dual_core_types::{Difficulty, GameAction, PieceKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameAction::from_str("laneLeft"), Some(GameAction::LaneLeft));
//!
//! let preset = Difficulty::Normal.preset();
//! assert_eq!(preset.lane_count, 4);
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Spawn anchor (column, row) for every new piece
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Size of one grid cell in grid pixel space (particles live in this space)
pub const CELL_PX: f64 = 30.0;

/// Duration of one nominal frame (60fps) in milliseconds
pub const NOMINAL_FRAME_MS: f64 = 16.67;

/// Upper bound on a normalized frame delta
pub const MAX_FRAME_DELTA: f64 = 3.0;

/// Auto-drop interval at speed multiplier 1
pub const BASE_DROP_MS: f64 = 800.0;

/// Lives at the start of every run
pub const STARTING_LIVES: u32 = 5;

/// Frames a feedback message stays on screen
pub const FEEDBACK_FRAMES: u32 = 60;

/// Base obstacle speed multiplier applied on every traffic collision (+2%)
pub const COLLISION_SPEED_FACTOR: f64 = 1.02;

/// Upper bound (exclusive) of the random spawn speed bonus
pub const SPAWN_SPEED_JITTER: f64 = 0.25;

/// Vertical position at which obstacles enter the field
pub const OBSTACLE_SPAWN_Y: f64 = -100.0;

/// Vertical extent used for obstacle collision tests
pub const OBSTACLE_HIT_HEIGHT: f64 = 80.0;

/// Drawn obstacle size
pub const OBSTACLE_WIDTH: f64 = 80.0;
pub const OBSTACLE_HEIGHT: f64 = 90.0;

/// Vehicle size
pub const VEHICLE_WIDTH: f64 = 80.0;
pub const VEHICLE_HEIGHT: f64 = 90.0;

/// Distance from the bottom of the field to the vehicle's top edge
pub const VEHICLE_BOTTOM_OFFSET: f64 = 180.0;

/// Default traffic field height in world units
pub const DEFAULT_FIELD_HEIGHT: f64 = 720.0;

/// Road backdrop tile height; the scroll offset wraps at this value
pub const ROAD_TILE_HEIGHT: f64 = 512.0;

/// Countdown labels, shown one per step
pub const COUNTDOWN_LABELS: [&str; 5] = ["3", "2", "1", "READY", "GO!"];

/// Gap between countdown labels
pub const COUNTDOWN_STEP_MS: f64 = 1000.0;

/// Gap between the final countdown label and the run start
pub const COUNTDOWN_LAUNCH_MS: f64 = 500.0;

/// Results screen duration
pub const GAME_OVER_DISPLAY_MS: f64 = 6000.0;

/// Number of ranked leaderboard entries kept
pub const LEADERBOARD_SIZE: usize = 5;

/// Message shown after a traffic collision
pub const COLLISION_FEEDBACK: &str = "Speed Up!";


/// The seven block kinds
///
/// Each kind has a fixed shape matrix (see the core crate) and a color tag:
/// - **I**: Cyan, 1x4 bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Kind at table position `i` (wraps modulo 7)
    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use dual_core_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("L"), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Color tag as a 24-bit RGB triple
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x00, 0xff, 0xff),
            PieceKind::O => (0xfa, 0xcc, 0x15),
            PieceKind::T => (0xa8, 0x55, 0xf7),
            PieceKind::S => (0x22, 0xc5, 0x5e),
            PieceKind::Z => (0xef, 0x44, 0x44),
            PieceKind::J => (0x3b, 0x82, 0xf6),
            PieceKind::L => (0xf9, 0x73, 0x16),
        }
    }
}

/// A cell on the block grid
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Filled, colored like the piece that locked there
pub type Cell = Option<PieceKind>;

/// Player inputs consumed by the running game
///
/// Piece actions go to the block grid, lane actions to the traffic field.
/// Every action is applied immediately when received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the falling piece one column left
    PieceLeft,
    /// Move the falling piece one column right
    PieceRight,
    /// Rotate the falling piece 90° clockwise
    PieceRotate,
    /// Drop the falling piece one row (locks it if it cannot move)
    PieceSoftDrop,
    /// Steer the vehicle one lane left
    LaneLeft,
    /// Steer the vehicle one lane right
    LaneRight,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use dual_core_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("pieceRotate"), Some(GameAction::PieceRotate));
    /// assert_eq!(GameAction::from_str("laneright"), Some(GameAction::LaneRight));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pieceleft" => Some(GameAction::PieceLeft),
            "pieceright" => Some(GameAction::PieceRight),
            "piecerotate" => Some(GameAction::PieceRotate),
            "piecesoftdrop" => Some(GameAction::PieceSoftDrop),
            "laneleft" => Some(GameAction::LaneLeft),
            "laneright" => Some(GameAction::LaneRight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::PieceLeft => "pieceLeft",
            GameAction::PieceRight => "pieceRight",
            GameAction::PieceRotate => "pieceRotate",
            GameAction::PieceSoftDrop => "pieceSoftDrop",
            GameAction::LaneLeft => "laneLeft",
            GameAction::LaneRight => "laneRight",
        }
    }

    /// True for actions routed to the block grid
    pub fn is_piece_action(&self) -> bool {
        matches!(
            self,
            GameAction::PieceLeft
                | GameAction::PieceRight
                | GameAction::PieceRotate
                | GameAction::PieceSoftDrop
        )
    }
}

/// Traffic parameters selected from the menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyPreset {
    pub lane_count: u8,
    pub base_obstacle_speed: f64,
    pub spawn_interval_ms: f64,
}

/// The three fixed difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => DifficultyPreset {
                lane_count: 3,
                base_obstacle_speed: 2.8,
                spawn_interval_ms: 1800.0,
            },
            Difficulty::Normal => DifficultyPreset {
                lane_count: 4,
                base_obstacle_speed: 3.6,
                spawn_interval_ms: 1400.0,
            },
            Difficulty::Hard => DifficultyPreset {
                lane_count: 5,
                base_obstacle_speed: 4.4,
                spawn_interval_ms: 1000.0,
            },
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "e" | "1" => Some(Difficulty::Easy),
            "normal" | "n" | "2" => Some(Difficulty::Normal),
            "hard" | "h" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Session phase
///
/// The cycle is Menu → Countdown → Running → Ended → Menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Menu,
    Countdown,
    Running,
    Ended,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Countdown => "countdown",
            Phase::Running => "running",
            Phase::Ended => "ended",
        }
    }
}

/// Sound cue requested from the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    /// One or more rows cleared
    Line,
    /// Vehicle hit an obstacle
    Crash,
    /// Countdown tick
    Beep,
    Other,
}

impl SoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::Line => "line",
            SoundKind::Crash => "crash",
            SoundKind::Beep => "beep",
            SoundKind::Other => "other",
        }
    }

    /// Oscillator frequency before the pitch offset is added
    pub fn base_frequency_hz(&self) -> f64 {
        match self {
            SoundKind::Line => 880.0,
            SoundKind::Crash => 150.0,
            SoundKind::Beep => 600.0,
            SoundKind::Other => 300.0,
        }
    }
}
