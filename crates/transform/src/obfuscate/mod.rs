//! JavaScript obfuscation.
//!
//! Text-level passes over already-minified source, driven by a small token
//! scanner. Pass order: literal simplification, numbers-to-expressions,
//! control-flow flattening, string-array extraction. Every pass preserves
//! program semantics; eligibility rules are conservative and skip anything
//! a rewrite could break.

mod flatten;
mod lexer;
mod numbers;
mod simplify;
mod strings;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed obfuscation profile.
///
/// The service applies the same profile to every JavaScript payload; none of
/// the thresholds are caller-adjustable. The one extra knob is `seed`, which
/// pins the RNG for deterministic output in tests.
#[derive(Clone, Debug)]
pub struct ObfuscatorConfig {
    /// Emit compact output (no separator newlines around generated code).
    pub compact: bool,
    /// Rewrite eligible function bodies into switch-dispatch loops.
    pub control_flow_flattening: bool,
    /// Fraction of eligible function bodies that get flattened.
    pub control_flow_flattening_threshold: f64,
    /// Rewrite integer literals as arithmetic expressions.
    pub numbers_to_expressions: bool,
    /// Compact boolean and `undefined` literals.
    pub simplify: bool,
    /// Extract string literals into a hoisted array behind an accessor.
    pub string_array: bool,
    /// Shuffle the hoisted array.
    pub string_array_shuffle: bool,
    /// Fraction of eligible string literals that get extracted.
    pub string_array_threshold: f64,
    /// RNG seed; `None` draws entropy from the OS.
    pub seed: Option<u64>,
}

impl Default for ObfuscatorConfig {
    fn default() -> Self {
        Self {
            compact: true,
            control_flow_flattening: true,
            control_flow_flattening_threshold: 0.75,
            numbers_to_expressions: true,
            simplify: true,
            string_array: true,
            string_array_shuffle: true,
            string_array_threshold: 0.75,
            seed: None,
        }
    }
}

impl ObfuscatorConfig {
    /// Default profile with a pinned RNG seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Run the configured passes over minified JavaScript.
pub fn obfuscate(source: &str, config: &ObfuscatorConfig) -> String {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut code = source.to_string();
    if config.simplify {
        code = simplify::apply(&code);
    }
    if config.numbers_to_expressions {
        code = numbers::apply(&code, &mut rng);
    }
    if config.control_flow_flattening {
        code = flatten::apply(
            &code,
            config.control_flow_flattening_threshold,
            config.compact,
            &mut rng,
        );
    }
    if config.string_array {
        code = strings::apply(
            &code,
            config.string_array_threshold,
            config.string_array_shuffle,
            config.compact,
            &mut rng,
        );
    }
    code
}

// Generate a `_0x....` identifier unused in `source` and not already taken.
pub(crate) fn fresh_hex_name(source: &str, taken: &[String], rng: &mut StdRng) -> String {
    loop {
        let name = format!("_0x{:04x}", rng.gen_range(0x1000..=0xffff_u32));
        if !source.contains(&name) && !taken.iter().any(|t| t == &name) {
            return name;
        }
    }
}
