/*!
Elementary Math

Thin wrappers over the host floating-point routines. Domain errors are not
checked: `Sqrt(-1.0)` is NaN and `Log(0.0)` is negative infinity, exactly as
IEEE-754 prescribes.
*/

#[unsafe(export_name = "Sqrt")]
pub extern "C" fn ada_sqrt(x: f64) -> f64 {
    x.sqrt()
}

/// Wraps on `i32::MIN`, whose magnitude has no `i32` representation.
#[unsafe(export_name = "Abs_Integer")]
pub extern "C" fn ada_abs_integer(x: i32) -> i32 {
    x.wrapping_abs()
}

#[unsafe(export_name = "Abs_Real")]
pub extern "C" fn ada_abs_real(x: f64) -> f64 {
    x.abs()
}

#[unsafe(export_name = "Power")]
pub extern "C" fn ada_power(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

#[unsafe(export_name = "Sin")]
pub extern "C" fn ada_sin(x: f64) -> f64 {
    x.sin()
}

#[unsafe(export_name = "Cos")]
pub extern "C" fn ada_cos(x: f64) -> f64 {
    x.cos()
}

#[unsafe(export_name = "Tan")]
pub extern "C" fn ada_tan(x: f64) -> f64 {
    x.tan()
}

#[unsafe(export_name = "Exp")]
pub extern "C" fn ada_exp(x: f64) -> f64 {
    x.exp()
}

/// Natural logarithm
#[unsafe(export_name = "Log")]
pub extern "C" fn ada_log(x: f64) -> f64 {
    x.ln()
}
