mod test_curve_basic;
mod test_spline_basic;
