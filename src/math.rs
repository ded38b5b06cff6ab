/// 2D vector math and the handful of numeric helpers the simulation shares.
///
/// Every mutating operation (`add`, `scale`, `rotate`, ...) has an `n`-prefixed
/// counterpart that leaves `self` untouched and returns a new vector.  Callers
/// pick the variant explicitly; there is no copy-on-write behind the scenes.

use rand::Rng;

/// Degrees → radians.  Headings are stored in degrees and converted here at
/// the point of use.
pub const RAD: f64 = std::f64::consts::PI / 180.0;
pub const PI: f64 = std::f64::consts::PI;
pub const TWO_PI: f64 = std::f64::consts::PI * 2.0;
pub const PI_OVER_4: f64 = std::f64::consts::PI / 4.0;
pub const PI_OVER_8: f64 = std::f64::consts::PI / 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn set(&mut self, v: Vector) -> &mut Self {
        self.x = v.x;
        self.y = v.y;
        self
    }

    // ── Mutating forms ───────────────────────────────────────────────────────

    pub fn add(&mut self, v: Vector) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self
    }

    pub fn sub(&mut self, v: Vector) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self
    }

    pub fn scale(&mut self, s: f64) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self
    }

    /// Normalise in place.  A zero-length vector stays at zero.
    pub fn norm(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            self.x /= len;
            self.y /= len;
        } else {
            self.x = 0.0;
            self.y = 0.0;
        }
        self
    }

    /// Rotate counter-clockwise by `a` radians.
    pub fn rotate(&mut self, a: f64) -> &mut Self {
        let (sa, ca) = a.sin_cos();
        let rx = self.x * ca - self.y * sa;
        let ry = self.x * sa + self.y * ca;
        self.x = rx;
        self.y = ry;
        self
    }

    pub fn invert(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }

    /// Rescale to length `s`.  A zero-length vector stays at zero.
    pub fn scale_to(&mut self, s: f64) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            self.scale(s / len)
        } else {
            self.set(Vector::ZERO)
        }
    }

    // ── Non-mutating forms ───────────────────────────────────────────────────

    pub fn nadd(&self, v: Vector) -> Vector {
        Vector::new(self.x + v.x, self.y + v.y)
    }

    pub fn nsub(&self, v: Vector) -> Vector {
        Vector::new(self.x - v.x, self.y - v.y)
    }

    pub fn nscale(&self, s: f64) -> Vector {
        Vector::new(self.x * s, self.y * s)
    }

    pub fn nnorm(&self) -> Vector {
        let mut v = *self;
        v.norm();
        v
    }

    pub fn nrotate(&self, a: f64) -> Vector {
        let mut v = *self;
        v.rotate(a);
        v
    }

    pub fn ninvert(&self) -> Vector {
        Vector::new(-self.x, -self.y)
    }

    pub fn nscale_to(&self, s: f64) -> Vector {
        let mut v = *self;
        v.scale_to(s);
        v
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn dot(&self, v: Vector) -> f64 {
        self.x * v.x + self.y * v.y
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, v: Vector) -> f64 {
        let xx = self.x - v.x;
        let yy = self.y - v.y;
        (xx * xx + yy * yy).sqrt()
    }

    /// Angle of the vector from the +x axis (atan2).
    pub fn theta(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unsigned angle between two vectors, 0 when either has zero length.
    pub fn theta_to(&self, v: Vector) -> f64 {
        let a = self.nnorm();
        let b = v.nnorm();
        if a == Vector::ZERO || b == Vector::ZERO {
            return 0.0;
        }
        a.dot(b).clamp(-1.0, 1.0).acos()
    }
}

/// Random integer in `[low, high]` inclusive for integral bounds.  Fractional
/// bounds are allowed (`size / 2.0` for odd sizes); only the result is
/// truncated.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> i32 {
    let r: f64 = rng.gen();
    (r * (high - low + 1.0) + low).trunc() as i32
}

/// Uniform value in `[0, 1)`.
pub fn rnd<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen()
}
