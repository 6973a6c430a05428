//! Score postprocessing: softmax and argmax.

/// Converts raw logits into a probability distribution.
///
/// Subtracts the maximum logit before exponentiating so large scores cannot
/// overflow. Non-finite logits contribute zero mass; an all-zero sum yields
/// a zero vector rather than NaN.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let mut max = f32::NEG_INFINITY;
    for &value in logits {
        if value.is_finite() && value > max {
            max = value;
        }
    }

    let mut exps = Vec::with_capacity(logits.len());
    let mut sum = 0.0f32;
    for &value in logits {
        let exp = if value.is_finite() {
            (value - max).exp()
        } else {
            0.0
        };
        exps.push(exp);
        sum += exp;
    }

    if sum == 0.0 {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|v| v / sum).collect()
}

/// Returns the index and score of the largest entry.
///
/// Returns `None` for an empty slice. Ties resolve to the first maximum.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-6;

    #[test]
    fn test_softmax_is_a_distribution() {
        let logits = [2.0, -1.0, 0.5, 3.0, 0.0, -2.5, 1.0, 0.1, -0.1, 2.2];
        let probs = softmax(&logits);

        assert_eq!(probs.len(), 10);
        for &p in &probs {
            assert!((0.0..=1.0).contains(&p));
        }
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_softmax_handles_large_logits() {
        let logits = [1000.0, 999.0, 998.0];
        let probs = softmax(&logits);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < TOLERANCE);
        assert!(probs.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_argmax_invariant_under_logit_shift() {
        let logits = [2.0, -1.0, 0.5, 3.0, 0.0, -2.5, 1.0, 0.1, -0.1, 2.2];
        let shifted: Vec<f32> = logits.iter().map(|l| l + 57.0).collect();

        let base = argmax(&softmax(&logits)).unwrap();
        let moved = argmax(&softmax(&shifted)).unwrap();
        assert_eq!(base.0, moved.0);
    }

    #[test]
    fn test_dominant_logit_is_confident() {
        let logits = [5.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let probs = softmax(&logits);
        let (class, confidence) = argmax(&probs).unwrap();

        assert_eq!(class, 0);
        assert!(confidence > 0.9);
    }

    #[test]
    fn test_uniform_logits_split_evenly() {
        let logits = [1.0; 10];
        let probs = softmax(&logits);
        for &p in &probs {
            assert!((p - 0.1).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_argmax_empty_is_none() {
        assert!(argmax(&[]).is_none());
    }

    #[test]
    fn test_argmax_tie_takes_first() {
        assert_eq!(argmax(&[0.4, 0.4, 0.2]).unwrap().0, 0);
    }
}
