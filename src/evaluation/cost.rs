//! Full and incremental tour cost.

use crate::distance::DistanceModel;

/// Computes the total length of a closed tour, including the return edge
/// from the last city to the first. O(n).
///
/// Tours with fewer than two cities have zero cost.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::evaluation::full_cost;
/// use u_tsp::models::City;
///
/// let dm = DistanceMatrix::from_cities(&[
///     City::new(0, 0.0, 0.0),
///     City::new(1, 3.0, 0.0),
///     City::new(2, 3.0, 4.0),
/// ]);
/// assert!((full_cost(&[0, 1, 2], &dm) - 12.0).abs() < 1e-10);
/// ```
pub fn full_cost<M: DistanceModel + ?Sized>(cities: &[usize], model: &M) -> f64 {
    if cities.len() < 2 {
        return 0.0;
    }
    let mut cost = 0.0;
    for w in cities.windows(2) {
        cost += model.distance(w[0], w[1]);
    }
    cost + model.distance(cities[cities.len() - 1], cities[0])
}

/// Cost change from exchanging the cities at positions `i` and `j`.
///
/// Only the edges incident to the two positions are evaluated: edge `k`
/// joins positions `k` and `(k + 1) % n`, and the affected edges are
/// `i - 1`, `i`, `j - 1` and `j` (mod n). When the positions are adjacent,
/// including the wrap-around pair `(0, n - 1)`, two of those edges coincide
/// and are counted once. Returns `after - before`; negative means the swap
/// shortens the tour.
pub fn swap_delta_cost<M: DistanceModel + ?Sized>(
    cities: &[usize],
    model: &M,
    i: usize,
    j: usize,
) -> f64 {
    let n = cities.len();
    if i == j || n < 2 {
        return 0.0;
    }

    let candidates = [(i + n - 1) % n, i, (j + n - 1) % n, j];
    let mut edges = [0usize; 4];
    let mut count = 0;
    for e in candidates {
        if !edges[..count].contains(&e) {
            edges[count] = e;
            count += 1;
        }
    }

    let swapped = |p: usize| {
        if p == i {
            cities[j]
        } else if p == j {
            cities[i]
        } else {
            cities[p]
        }
    };

    let mut before = 0.0;
    let mut after = 0.0;
    for &k in &edges[..count] {
        let next = (k + 1) % n;
        before += model.distance(cities[k], cities[next]);
        after += model.distance(swapped(k), swapped(next));
    }
    after - before
}

/// Cost change from reversing the segment of positions `i..=j` (`i < j`).
///
/// Only the two boundary edges change for a symmetric model:
///
/// ```text
/// before: a - t[i] ... t[j] - b
/// after:  a - t[j] ... t[i] - b
/// ```
///
/// Reversing the whole tour (`i == 0`, `j == n - 1`) has zero delta.
pub fn reversal_delta_cost<M: DistanceModel + ?Sized>(
    cities: &[usize],
    model: &M,
    i: usize,
    j: usize,
) -> f64 {
    let n = cities.len();
    if i >= j || (i == 0 && j == n - 1) {
        return 0.0;
    }
    let a = cities[(i + n - 1) % n];
    let b = cities[(j + 1) % n];
    let first = cities[i];
    let last = cities[j];

    let old_cost = model.distance(a, first) + model.distance(last, b);
    let new_cost = model.distance(a, last) + model.distance(first, b);
    new_cost - old_cost
}
