//! Connected-component labeling of binary masks via flood fill.
//!
//! Partitions the foreground pixels of a boolean mask into disjoint
//! 8-connected components. The mask is scanned in raster order (row 0
//! first, left to right within a row); each unvisited foreground pixel
//! seeds a flood fill that claims every foreground pixel reachable through
//! chains of 8-adjacent foreground pixels. Labels are consecutive integers
//! starting at 1 in discovery order, with 0 reserved for background.
//!
//! # Connectivity
//! Uses 8-connectivity: the full 3x3 neighborhood minus the center, so
//! diagonal-only contact joins two pixels into one component. This is more
//! permissive than the 4-connectivity used by two-pass union-find labelers.
//!
//! # Determinism
//! For a fixed mask the label map and the component ordering are fully
//! determined by the raster scan: of several touching regions the one whose
//! earliest pixel comes first in scan order gets the lower label, and each
//! component's recorded seed is its lexicographically smallest (row, col)
//! pixel.

use crate::registry::Blob;
use ndarray::{Array2, ArrayView2};

/// Eight-connected neighbor offsets as (row, col) deltas.
const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Label the 8-connected foreground components of a binary mask.
///
/// Performs a raster scan over the mask; every unvisited foreground pixel
/// starts a flood fill driven by an explicit work-list stack rather than
/// recursion, so auxiliary space stays bounded by the mask size even for
/// large, thin, winding components. Each foreground pixel is claimed by
/// exactly one fill, giving O(H*W) time overall.
///
/// Total over all boolean masks: an all-false mask yields zero blobs, an
/// all-true mask yields a single blob covering the grid, and a mask with a
/// zero dimension yields an equally-shaped empty label map and no blobs.
///
/// # Arguments
/// * `mask` - Binary mask where true marks foreground
///
/// # Returns
/// Tuple of:
/// - Label map with the mask's dimensions: 0 for background, otherwise the
///   component id in 1..=N
/// - Blobs in discovery order, so `blobs[i].label == i + 1`
pub fn label_blobs(mask: &ArrayView2<bool>) -> (Array2<usize>, Vec<Blob>) {
    let (height, width) = mask.dim();
    let mut label_map = Array2::zeros((height, width));
    let mut blobs: Vec<Blob> = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for row in 0..height {
        for col in 0..width {
            if !mask[[row, col]] || label_map[[row, col]] != 0 {
                continue;
            }

            // Unvisited foreground pixel: claim a new label and fill from it.
            let label = blobs.len() + 1;
            let mut pixel_count = 0;

            label_map[[row, col]] = label;
            stack.push((row, col));

            while let Some((y, x)) = stack.pop() {
                pixel_count += 1;
                for (dy, dx) in NEIGHBORS_8 {
                    let ny = y as isize + dy;
                    let nx = x as isize + dx;
                    if ny < 0 || nx < 0 || ny >= height as isize || nx >= width as isize {
                        continue;
                    }
                    let (ny, nx) = (ny as usize, nx as usize);
                    // Mark on push so no pixel enters the stack twice
                    if mask[[ny, nx]] && label_map[[ny, nx]] == 0 {
                        label_map[[ny, nx]] = label;
                        stack.push((ny, nx));
                    }
                }
            }

            blobs.push(Blob {
                label,
                seed: (row, col),
                pixel_count,
            });
        }
    }

    (label_map, blobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Creates a binary mask from a 2D array of 1s and 0s
    /// The formatting of the array makes it easy to see the pattern visually
    fn create_test_mask(pattern: &[&[i32]]) -> Array2<bool> {
        let height = pattern.len();
        let width = pattern[0].len();

        let mut mask = Array2::from_elem((height, width), false);
        for (i, row) in pattern.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                mask[[i, j]] = value != 0;
            }
        }

        mask
    }

    /// Helper function to check if the label map matches expected labels
    fn assert_labels_match(label_map: &Array2<usize>, expected: &[&[i32]]) {
        for (i, row) in expected.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let expected_value = value as usize;
                assert_eq!(
                    label_map[[i, j]],
                    expected_value,
                    "Mismatch at position [{}, {}]: expected {}, got {}",
                    i,
                    j,
                    expected_value,
                    label_map[[i, j]]
                );
            }
        }
    }

    /// Test empty mask (all background)
    #[test]
    fn test_all_background() {
        let pattern: &[&[i32]] = &[
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ];

        let mask = create_test_mask(pattern);
        let (label_map, blobs) = label_blobs(&mask.view());

        assert!(blobs.is_empty());
        assert_labels_match(&label_map, pattern);
    }

    /// Test all-foreground mask: one blob covering the grid
    #[test]
    fn test_all_foreground() {
        let mask = Array2::from_elem((4, 6), true);
        let (label_map, blobs) = label_blobs(&mask.view());

        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].label, 1);
        assert_eq!(blobs[0].seed, (0, 0));
        assert_eq!(blobs[0].pixel_count, 24);
        assert!(label_map.iter().all(|&l| l == 1));
    }

    /// Test simple single component (square)
    #[test]
    fn test_single_component() {
        let pattern: &[&[i32]] = &[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 0, 0],
            &[0, 1, 1, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ];

        let mask = create_test_mask(pattern);
        let (label_map, blobs) = label_blobs(&mask.view());

        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].seed, (1, 1));
        assert_eq!(blobs[0].pixel_count, 4);
        assert_labels_match(&label_map, pattern);
    }

    /// Test two separate components in scan order
    #[test]
    fn test_two_components() {
        let pattern: &[&[i32]] = &[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 0, 0],
            &[0, 1, 1, 0, 0],
            &[0, 0, 0, 0, 1],
            &[0, 0, 0, 0, 1],
        ];

        let mask = create_test_mask(pattern);
        let (label_map, blobs) = label_blobs(&mask.view());

        let expected: &[&[i32]] = &[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 0, 0],
            &[0, 1, 1, 0, 0],
            &[0, 0, 0, 0, 2],
            &[0, 0, 0, 0, 2],
        ];

        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].pixel_count, 4);
        assert_eq!(blobs[1].pixel_count, 2);
        assert_labels_match(&label_map, expected);
    }

    /// Diagonal-only contact joins pixels into one component
    #[test]
    fn test_diagonal_adjacency_merges() {
        let pattern: &[&[i32]] = &[
            &[1, 0, 0],
            &[0, 1, 0],
            &[0, 0, 0],
        ];

        let mask = create_test_mask(pattern);
        let (_, blobs) = label_blobs(&mask.view());

        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].seed, (0, 0));
        assert_eq!(blobs[0].pixel_count, 2);
    }

    /// Pixels two steps apart on the diagonal stay separate
    #[test]
    fn test_diagonal_gap_stays_separate() {
        let pattern: &[&[i32]] = &[
            &[1, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 0, 1, 0],
            &[0, 0, 0, 0],
        ];

        let mask = create_test_mask(pattern);
        let (_, blobs) = label_blobs(&mask.view());

        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].seed, (0, 0));
        assert_eq!(blobs[1].seed, (2, 2));
    }

    /// A diagonal staircase is a single component under 8-connectivity
    #[test]
    fn test_staircase_single_component() {
        let pattern: &[&[i32]] = &[
            &[1, 0, 0, 0],
            &[0, 1, 0, 0],
            &[0, 0, 1, 0],
            &[0, 0, 0, 1],
        ];

        let mask = create_test_mask(pattern);
        let (label_map, blobs) = label_blobs(&mask.view());

        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].pixel_count, 4);

        let expected: &[&[i32]] = &[
            &[1, 0, 0, 0],
            &[0, 1, 0, 0],
            &[0, 0, 1, 0],
            &[0, 0, 0, 1],
        ];
        assert_labels_match(&label_map, expected);
    }

    /// Test U-shaped component (joins across the scan)
    #[test]
    fn test_u_shape() {
        let pattern: &[&[i32]] = &[
            &[0, 0, 0, 0, 0],
            &[0, 1, 0, 1, 0],
            &[0, 1, 0, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
        ];

        let mask = create_test_mask(pattern);
        let (label_map, blobs) = label_blobs(&mask.view());

        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].seed, (1, 1));
        assert_eq!(blobs[0].pixel_count, 7);
        assert_labels_match(&label_map, pattern);
    }

    /// Test spiral shape (long winding path, exercises the explicit stack)
    #[test]
    fn test_spiral() {
        let pattern: &[&[i32]] = &[
            &[0, 0, 0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 1, 1, 0],
            &[0, 1, 0, 0, 0, 1, 0],
            &[0, 1, 0, 1, 1, 1, 0],
            &[0, 1, 0, 1, 0, 0, 0],
            &[0, 1, 1, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0, 0, 0],
        ];

        let mask = create_test_mask(pattern);
        let (label_map, blobs) = label_blobs(&mask.view());

        assert_eq!(blobs.len(), 1);
        assert_labels_match(&label_map, pattern);
    }

    /// Components touching the mask borders
    #[test]
    fn test_border_components() {
        let pattern: &[&[i32]] = &[
            &[1, 1, 0, 0, 1],
            &[1, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[1, 0, 0, 1, 1],
        ];

        let mask = create_test_mask(pattern);
        let (label_map, blobs) = label_blobs(&mask.view());

        let expected: &[&[i32]] = &[
            &[1, 1, 0, 0, 2],
            &[1, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[3, 0, 0, 4, 4],
        ];

        assert_eq!(blobs.len(), 4);
        assert_labels_match(&label_map, expected);
    }

    /// The recorded seed is the raster-smallest pixel of its component
    #[test]
    fn test_seed_is_raster_smallest() {
        // Plus shape: pixels (1,0), (0,1), (1,1), (2,1), (1,2)
        let pattern: &[&[i32]] = &[
            &[0, 1, 0],
            &[1, 1, 1],
            &[0, 1, 0],
        ];

        let mask = create_test_mask(pattern);
        let (_, blobs) = label_blobs(&mask.view());

        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].seed, (0, 1));
        assert_eq!(blobs[0].pixel_count, 5);
    }

    /// Two isolated pixels on a 5x5 mask
    #[test]
    fn test_two_isolated_pixels() {
        let mut mask = Array2::from_elem((5, 5), false);
        mask[[1, 1]] = true;
        mask[[3, 3]] = true;

        let (label_map, blobs) = label_blobs(&mask.view());

        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].label, 1);
        assert_eq!(blobs[0].seed, (1, 1));
        assert_eq!(blobs[0].pixel_count, 1);
        assert_eq!(blobs[1].label, 2);
        assert_eq!(blobs[1].seed, (3, 3));
        assert_eq!(blobs[1].pixel_count, 1);
        assert_eq!(label_map[[1, 1]], 1);
        assert_eq!(label_map[[3, 3]], 2);
    }

    /// Zero-dimension masks label to equally-shaped empty maps
    #[test]
    fn test_zero_dimension_mask() {
        for dim in [(0, 0), (0, 7), (7, 0)] {
            let mask = Array2::from_elem(dim, false);
            let (label_map, blobs) = label_blobs(&mask.view());
            assert_eq!(label_map.dim(), dim);
            assert!(blobs.is_empty());
        }
    }

    /// Partition property: labels cover foreground exactly, counts add up
    #[test]
    fn test_partition_property() {
        let pattern: &[&[i32]] = &[
            &[1, 0, 1, 0, 1, 0],
            &[0, 1, 0, 0, 0, 1],
            &[0, 0, 0, 1, 0, 0],
            &[1, 1, 0, 0, 0, 1],
        ];

        let mask = create_test_mask(pattern);
        let (label_map, blobs) = label_blobs(&mask.view());

        // Every foreground pixel carries a label in 1..=N, every background
        // pixel carries 0
        for ((y, x), &label) in label_map.indexed_iter() {
            if mask[[y, x]] {
                assert!(label >= 1 && label <= blobs.len());
            } else {
                assert_eq!(label, 0);
            }
        }

        // Component counts sum to the number of foreground pixels
        let foreground = mask.iter().filter(|&&fg| fg).count();
        let counted: usize = blobs.iter().map(|b| b.pixel_count).sum();
        assert_eq!(counted, foreground);

        // Per-blob count matches the label map
        for blob in &blobs {
            let in_map = label_map.iter().filter(|&&l| l == blob.label).count();
            assert_eq!(in_map, blob.pixel_count);
        }
    }

    /// Labeling the same mask twice is bit-identical
    #[test]
    fn test_determinism() {
        let pattern: &[&[i32]] = &[
            &[0, 1, 1, 0, 1],
            &[1, 0, 0, 1, 0],
            &[0, 0, 1, 0, 0],
            &[1, 0, 0, 0, 1],
        ];

        let mask = create_test_mask(pattern);
        let (map_a, blobs_a) = label_blobs(&mask.view());
        let (map_b, blobs_b) = label_blobs(&mask.view());

        assert_eq!(map_a, map_b);
        assert_eq!(blobs_a, blobs_b);
    }

    /// Connectivity fidelity: each label's pixel set is exactly the
    /// 8-reachable set from its seed
    #[test]
    fn test_connectivity_fidelity() {
        let pattern: &[&[i32]] = &[
            &[1, 1, 0, 0, 1],
            &[0, 1, 0, 1, 0],
            &[0, 0, 0, 0, 0],
            &[1, 0, 1, 1, 0],
        ];

        let mask = create_test_mask(pattern);
        let (label_map, blobs) = label_blobs(&mask.view());

        for blob in &blobs {
            let reachable = reachable_from(&mask, blob.seed);
            for ((y, x), &label) in label_map.indexed_iter() {
                let in_component = label == blob.label;
                assert_eq!(
                    in_component,
                    reachable[[y, x]],
                    "label {} disagrees with reachability at [{}, {}]",
                    blob.label,
                    y,
                    x
                );
            }
        }
    }

    /// Reference reachability computation, independent of label_blobs
    fn reachable_from(mask: &Array2<bool>, seed: (usize, usize)) -> Array2<bool> {
        let (height, width) = mask.dim();
        let mut visited = Array2::from_elem((height, width), false);
        let mut frontier = vec![seed];
        visited[[seed.0, seed.1]] = true;
        while let Some((y, x)) = frontier.pop() {
            for (dy, dx) in NEIGHBORS_8 {
                let ny = y as isize + dy;
                let nx = x as isize + dx;
                if ny < 0 || nx < 0 || ny >= height as isize || nx >= width as isize {
                    continue;
                }
                let (ny, nx) = (ny as usize, nx as usize);
                if mask[[ny, nx]] && !visited[[ny, nx]] {
                    visited[[ny, nx]] = true;
                    frontier.push((ny, nx));
                }
            }
        }
        visited
    }
}
