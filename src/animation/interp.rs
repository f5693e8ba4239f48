use crate::{
    animation::ease::Ease,
    foundation::error::{ReelError, ReelResult},
};

/// Piecewise-linear mapping from input stops to output stops, clamped outside the first and
/// last stop.
///
/// Stops are validated once in [`Curve::new`]; [`Curve::sample`] is total afterwards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Curve {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
    #[serde(default)]
    ease: Ease,
}

impl Curve {
    /// Build a clamped, linear curve.
    pub fn new(inputs: &[f64], outputs: &[f64]) -> ReelResult<Self> {
        let curve = Self {
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
            ease: Ease::Linear,
        };
        curve.validate()?;
        Ok(curve)
    }

    /// Apply `ease` inside every segment.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// At least two finite stops, equal lengths, strictly increasing inputs.
    pub fn validate(&self) -> ReelResult<()> {
        if self.inputs.len() < 2 {
            return Err(ReelError::schedule("curve needs at least two stops"));
        }
        if self.inputs.len() != self.outputs.len() {
            return Err(ReelError::schedule(format!(
                "curve has {} inputs but {} outputs",
                self.inputs.len(),
                self.outputs.len()
            )));
        }
        if self
            .inputs
            .iter()
            .chain(self.outputs.iter())
            .any(|v| !v.is_finite())
        {
            return Err(ReelError::schedule("curve stops must be finite"));
        }
        if !self.inputs.windows(2).all(|w| w[0] < w[1]) {
            return Err(ReelError::schedule(
                "curve inputs must be strictly increasing",
            ));
        }
        Ok(())
    }

    /// Output stops.
    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    /// Value at `x`. NaN samples the first stop.
    pub fn sample(&self, x: f64) -> f64 {
        let n = self.inputs.len();
        let x = if x.is_nan() { self.inputs[0] } else { x };

        let mut seg = n - 2;
        for i in 1..n - 1 {
            if self.inputs[i] >= x {
                seg = i - 1;
                break;
            }
        }

        let (x0, x1) = (self.inputs[seg], self.inputs[seg + 1]);
        let (y0, y1) = (self.outputs[seg], self.outputs[seg + 1]);

        if y0 == y1 {
            return y0;
        }

        let t = x.clamp(x0, x1);
        let u = self.ease.apply((t - x0) / (x1 - x0));
        y0 + (y1 - y0) * u
    }
}

/// Two-stop clamped interpolation.
///
/// Degenerate spans (`from >= to`) behave as a step at `to`, so this never divides by zero.
pub fn interpolate(x: f64, input: [f64; 2], output: [f64; 2]) -> f64 {
    let [x0, x1] = input;
    let [y0, y1] = output;
    if x.is_nan() || (x <= x0 && x < x1) {
        return y0;
    }
    if x >= x1 {
        return y1;
    }
    let u = (x - x0) / (x1 - x0);
    y0 + (y1 - y0) * u
}

/// Linear blend between `a` and `b` by `t`, without clamping.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
