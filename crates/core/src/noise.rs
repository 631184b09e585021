//! Seeded 2D gradient (Perlin) noise.
//!
//! [`WaveNoise`] scrambles Ken Perlin's reference permutation with the bytes
//! of a numeric seed and evaluates classic 2D Perlin noise with a quintic fade.
//! The tables are built once and never change, so the same seed always yields
//! bit-identical values for the same coordinates.

use ::noise::NoiseFn;

/// Ken Perlin's reference permutation.
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// The 12 cube-edge gradients. Only x and y take part in the 2D dot product.
const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Fractional seeds in (0, 1) are scaled by this before truncation.
const FRACTIONAL_SEED_SCALE: f64 = 65536.0;

/// Seeded 2D Perlin noise field.
///
/// Both tables are 512 entries long (the 256-entry tables duplicated) so
/// corner lookups never wrap.
#[derive(Debug, Clone)]
pub struct WaveNoise {
    perm: [u8; 512],
    grad: [[f64; 2]; 512],
}

impl WaveNoise {
    /// Builds the permutation and gradient tables for `seed`.
    ///
    /// Seeds in (0, 1) are scaled by 65536 first, so `Math.random()`-style
    /// seeds still spread over both scramble bytes. Integer seeds below 256
    /// are mirrored into the high byte.
    pub fn new(seed: f64) -> Self {
        let seed = normalize_seed(seed);
        let low = (seed & 255) as u8;
        let high = ((seed >> 8) & 255) as u8;

        let mut perm = [0u8; 512];
        let mut grad = [[0.0; 2]; 512];
        for (i, &p) in PERMUTATION.iter().enumerate() {
            let v = if i & 1 == 1 { p ^ low } else { p ^ high };
            let g = GRAD3[v as usize % 12];
            perm[i] = v;
            perm[i + 256] = v;
            grad[i] = [g[0], g[1]];
            grad[i + 256] = [g[0], g[1]];
        }
        Self { perm, grad }
    }

    /// Evaluates 2D Perlin noise at `(x, y)`.
    ///
    /// Continuous in both inputs, zero on integer lattice points, and close
    /// to [-1, 1] everywhere.
    pub fn perlin2(&self, x: f64, y: f64) -> f64 {
        let cell_x = x.floor();
        let cell_y = y.floor();
        let x = x - cell_x;
        let y = y - cell_y;
        let xi = (cell_x as i64 & 255) as usize;
        let yi = (cell_y as i64 & 255) as usize;

        let row0 = self.perm[yi] as usize;
        let row1 = self.perm[yi + 1] as usize;
        let n00 = dot2(self.grad[xi + row0], x, y);
        let n01 = dot2(self.grad[xi + row1], x, y - 1.0);
        let n10 = dot2(self.grad[xi + 1 + row0], x - 1.0, y);
        let n11 = dot2(self.grad[xi + 1 + row1], x - 1.0, y - 1.0);

        let u = fade(x);
        lerp(lerp(n00, n10, u), lerp(n01, n11, u), fade(y))
    }

    /// The scrambled permutation entry at `index` (0..512).
    pub fn permutation(&self, index: usize) -> u8 {
        self.perm[index]
    }
}

impl NoiseFn<f64, 2> for WaveNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.perlin2(point[0], point[1])
    }
}

/// Truncates a seed to the integer whose bytes scramble the permutation.
///
/// Mirrors JavaScript's `ToInt32` wrap for out-of-range seeds.
fn normalize_seed(seed: f64) -> i32 {
    let scaled = if seed > 0.0 && seed < 1.0 {
        seed * FRACTIONAL_SEED_SCALE
    } else {
        seed
    };
    let floored = scaled.floor();
    let mut s = floored as i64 as i32;
    if floored < 256.0 {
        s |= s << 8;
    }
    s
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

fn dot2(g: [f64; 2], x: f64, y: f64) -> f64 {
    g[0] * x + g[1] * y
}
