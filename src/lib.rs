pub mod constraint;
pub mod error;
pub mod game;
pub mod infer;
pub mod session;
pub mod tiles;

/// dimensional analysis types
pub type Probability = f64;
pub type Count = u64;

// dispatcher parameters
pub const TAU_EXACT: Count = 1_000_000;
pub const ALPHA_FLOOR: Probability = 0.01;
pub const PILOT_SAMPLES: usize = 1_000;
pub const TARGET_SAMPLES: usize = 10_000;
pub const BURN_IN_SWEEPS: usize = 1_000;

// sampler parameters: attempts budgeted per wanted sample
pub const SAMPLER_PATIENCE: usize = 1_000;

// marginal audit tolerance
pub const EPSILON: Probability = 1e-6;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// initialize terminal logging
pub fn init() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        log::LevelFilter::Debug,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
