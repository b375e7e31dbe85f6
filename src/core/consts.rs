/// Upper bound on states explored by the hint solver before it gives up.
pub const MAX_SOLVER_NODES: usize = 250_000;

/// Node cap for an in-game hint. The hint runs on the thread that drains countdown ticks,
/// so it must stay well under one tick interval.
pub const HINT_MAX_NODES: usize = 20_000;

/// Whether the solver drops states with a box wedged into a corner.
pub const TRIM_UNWINNABLE: bool = true;

pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;

// Per-tier defaults: (time limit seconds, hints, lives)
pub const EASY_DEFAULTS: (u32, u32, u32) = (600, 5, 5);
pub const MODERATE_DEFAULTS: (u32, u32, u32) = (450, 3, 3);
pub const HARD_DEFAULTS: (u32, u32, u32) = (300, 1, 3);
