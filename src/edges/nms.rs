//! Non-maximum suppression for edge thinning

use super::gradient::GradientField;

/// Thin gradient ridges to single-pixel edges.
///
/// Each pixel's direction is bucketed into one of four 45-degree orientation
/// classes; the magnitude survives only if it is >= both neighbors across the
/// edge, otherwise it is zeroed.
pub fn non_maximum_suppression(field: &GradientField, width: usize, height: usize) -> Vec<u8> {
    let magnitude = &field.magnitude;
    let mut result = vec![0u8; magnitude.len()];
    if width < 3 || height < 3 {
        return result;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = y * width + x;
            let mag = magnitude[idx];
            let angle = field.direction[idx].to_degrees();
            let normalized = ((angle % 180.0) + 180.0) % 180.0;

            let (neighbor1, neighbor2) = if !(22.5..157.5).contains(&normalized) {
                // Horizontal gradient: compare left and right
                (magnitude[idx - 1], magnitude[idx + 1])
            } else if normalized < 67.5 {
                // 45-degree diagonal
                (magnitude[(y - 1) * width + (x + 1)], magnitude[(y + 1) * width + (x - 1)])
            } else if normalized < 112.5 {
                // Vertical gradient: compare above and below
                (magnitude[(y - 1) * width + x], magnitude[(y + 1) * width + x])
            } else {
                // 135-degree diagonal
                (magnitude[(y - 1) * width + (x - 1)], magnitude[(y + 1) * width + (x + 1)])
            };

            if mag >= neighbor1 && mag >= neighbor2 {
                result[idx] = mag;
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_from(magnitude: Vec<u8>, direction: Vec<f32>) -> GradientField {
        GradientField { magnitude, direction }
    }

    #[test]
    fn test_suppresses_weaker_neighbor() {
        // 5x3, horizontal gradient (direction 0): ridge at x=2 wins over x=1/x=3
        let width = 5;
        let height = 3;
        let mut magnitude = vec![0u8; width * height];
        magnitude[width + 1] = 50;
        magnitude[width + 2] = 100;
        magnitude[width + 3] = 50;
        let direction = vec![0f32; width * height];
        let out = non_maximum_suppression(&field_from(magnitude, direction), width, height);
        assert_eq!(out[width + 2], 100);
        assert_eq!(out[width + 1], 0);
        assert_eq!(out[width + 3], 0);
    }

    #[test]
    fn test_plateau_survives() {
        // equal neighbors: >= keeps the plateau rather than gutting it
        let width = 5;
        let height = 3;
        let mut magnitude = vec![0u8; width * height];
        magnitude[width + 1] = 80;
        magnitude[width + 2] = 80;
        magnitude[width + 3] = 80;
        let direction = vec![0f32; width * height];
        let out = non_maximum_suppression(&field_from(magnitude, direction), width, height);
        assert_eq!(out[width + 2], 80);
    }

    #[test]
    fn test_vertical_class_compares_rows() {
        // direction pi/2 (vertical gradient): compare above/below
        let width = 3;
        let height = 5;
        let mut magnitude = vec![0u8; width * height];
        magnitude[width + 1] = 90;
        magnitude[2 * width + 1] = 40;
        let direction = vec![std::f32::consts::FRAC_PI_2; width * height];
        let out = non_maximum_suppression(&field_from(magnitude, direction), width, height);
        assert_eq!(out[width + 1], 90);
        assert_eq!(out[2 * width + 1], 0);
    }
}
