use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

use crate::store::Template;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}\s]+)\}").expect("placeholder regex"));

/// Each candidate draws `u * weight` with `u` in `[0, 1)`; the highest draw wins.
/// Weight biases the draw rather than giving an exact proportional share.
/// Negative or NaN weights count as 0. Tied draws (e.g. every weight is 0) are
/// broken uniformly at random.
pub fn pick_weighted<'a, R: Rng + ?Sized>(templates: &'a [Template], rng: &mut R) -> Option<&'a Template> {
    let mut best: Option<(&Template, f64)> = None;
    let mut tied = 0u32;
    for t in templates {
        let key = rng.random::<f64>() * t.weight.max(0.0);
        match best {
            Some((_, top)) if key < top => {}
            Some((_, top)) if key == top => {
                // reservoir sample over the tied candidates
                tied += 1;
                if rng.random_range(0..tied) == 0 {
                    best = Some((t, key));
                }
            }
            _ => {
                best = Some((t, key));
                tied = 1;
            }
        }
    }
    best.map(|(t, _)| t)
}

/// `{name}` tokens left in a template's text. Nothing substitutes them.
pub fn unfilled_placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER.captures_iter(text).map(|c| c[1].to_string()).collect()
}
