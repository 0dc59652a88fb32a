// Vector arithmetic for analogy resolution.
//
// The analogy vector translates an entity from one group to another:
//
//   v_eq = v_entity - centroid_source + centroid_target
//
// i.e. "the entity's offset from its own group's center, re-applied around
// the other group's center". Perturbation adds tiny uniform noise so
// repeated nearest-neighbor queries can reach candidates that quantized
// indexes miss from a single exact anchor.

use rand::Rng;

use super::error::ResolveError;

/// Compute `entity - source_centroid + target_centroid` component-wise.
///
/// All three vectors must share the entity's dimensionality, and the
/// result must be finite. Errors name the offending vector's id.
pub fn analogy_vector(
    entity: (&str, &[f32]),
    source_centroid: (&str, &[f32]),
    target_centroid: (&str, &[f32]),
) -> Result<Vec<f32>, ResolveError> {
    let (entity_id, v_e) = entity;
    let expected = v_e.len();

    for (id, v) in [source_centroid, target_centroid] {
        if v.len() != expected {
            return Err(ResolveError::DimensionMismatch {
                id: id.to_string(),
                expected,
                actual: v.len(),
            });
        }
    }

    let v_eq: Vec<f32> = v_e
        .iter()
        .zip(source_centroid.1)
        .zip(target_centroid.1)
        .map(|((e, s), t)| e - s + t)
        .collect();

    if let Some(index) = v_eq.iter().position(|x| !x.is_finite()) {
        return Err(ResolveError::NonFinite {
            id: entity_id.to_string(),
            index,
        });
    }

    Ok(v_eq)
}

/// Mean absolute component of a vector: the "typical component scale"
/// perturbation amplitude is measured against.
pub fn component_scale(v: &[f32]) -> f32 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().map(|x| x.abs()).sum::<f32>() / v.len() as f32
}

/// Return a copy of `v` with uniform noise in `[-amplitude, amplitude]`
/// added to every component. A zero, negative or non-finite amplitude
/// returns the vector unchanged.
pub fn perturb<R: Rng + ?Sized>(v: &[f32], amplitude: f32, rng: &mut R) -> Vec<f32> {
    if amplitude <= 0.0 || !amplitude.is_finite() {
        return v.to_vec();
    }
    v.iter()
        .map(|x| x + rng.random_range(-amplitude..=amplitude))
        .collect()
}

/// Cosine similarity clamped to 0.0..=1.0.
///
/// Mismatched dimensions, empty vectors and zero vectors all score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let mag_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}

/// Component-wise mean of equally sized vectors. `None` for an empty slice
/// or when dimensions disagree.
pub fn mean_vector(vectors: &[&[f32]]) -> Option<Vec<f32>> {
    let dim = vectors.first()?.len();
    if vectors.iter().any(|v| v.len() != dim) {
        return None;
    }

    let mut mean = vec![0.0_f32; dim];
    for v in vectors {
        for (acc, x) in mean.iter_mut().zip(v.iter()) {
            *acc += x;
        }
    }
    let n = vectors.len() as f32;
    for x in &mut mean {
        *x /= n;
    }
    Some(mean)
}
