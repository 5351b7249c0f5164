//! Polynomial performance curves.

use hs_core::{HsError, HsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveForm {
    Linear,
    Quadratic,
    Cubic,
    /// `c0 + c1 x + c2 x² + c3 y + c4 y² + c5 x y`
    Biquadratic,
}

impl CurveForm {
    pub fn coefficient_count(self) -> usize {
        match self {
            CurveForm::Linear => 2,
            CurveForm::Quadratic => 3,
            CurveForm::Cubic => 4,
            CurveForm::Biquadratic => 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub name: String,
    pub form: CurveForm,
    pub coefficients: Vec<f64>,
    pub x_range: (f64, f64),
    pub y_range: Option<(f64, f64)>,
}

impl Curve {
    pub fn new(
        name: impl Into<String>,
        form: CurveForm,
        coefficients: &[f64],
        x_range: (f64, f64),
    ) -> HsResult<Self> {
        if coefficients.len() != form.coefficient_count() {
            return Err(HsError::InvalidArg {
                what: "curve coefficient count does not match its form",
            });
        }
        if x_range.0 > x_range.1 {
            return Err(HsError::InvalidArg {
                what: "curve x range is inverted",
            });
        }
        Ok(Self {
            name: name.into(),
            form,
            coefficients: coefficients.to_vec(),
            x_range,
            y_range: None,
        })
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    /// Evaluate with inputs clamped to the curve limits. `y` is ignored by
    /// single-variable forms.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let x = x.clamp(self.x_range.0, self.x_range.1);
        let y = match self.y_range {
            Some((lo, hi)) => y.clamp(lo, hi),
            None => y,
        };
        let c = &self.coefficients;
        match self.form {
            CurveForm::Linear => c[0] + c[1] * x,
            CurveForm::Quadratic => c[0] + c[1] * x + c[2] * x * x,
            CurveForm::Cubic => c[0] + c[1] * x + c[2] * x * x + c[3] * x * x * x,
            CurveForm::Biquadratic => {
                c[0] + c[1] * x + c[2] * x * x + c[3] * y + c[4] * y * y + c[5] * x * y
            }
        }
    }
}
