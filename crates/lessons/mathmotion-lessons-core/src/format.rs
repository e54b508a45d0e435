//! Number and term formatting for narration and labels.

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Integers without a decimal point, other values rounded to at most 3 places.
pub fn num(x: f64) -> String {
    let rounded = (x * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 && rounded.abs() < 1e15 {
        return format!("{}", rounded as i64);
    }
    let s = format!("{rounded:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Exactly `places` decimals (e.g. `0.500`).
pub fn fixed(x: f64, places: usize) -> String {
    let s = format!("{x:.places$}");
    // "-0.000" reads badly to kids
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

pub fn superscript(n: i64) -> String {
    let mut out = String::new();
    if n < 0 {
        out.push('⁻');
    }
    for d in n.unsigned_abs().to_string().bytes() {
        out.push(SUPERSCRIPT_DIGITS[(d - b'0') as usize]);
    }
    out
}

/// One monomial: `term(3.0, 2, "x") == "3x²"`, `term(-1.0, 1, "x") == "-x"`.
pub fn term(coefficient: f64, power: i64, var: &str) -> String {
    if coefficient == 0.0 {
        return "0".to_string();
    }
    if power == 0 {
        return num(coefficient);
    }
    let coef = match num(coefficient).as_str() {
        "1" => String::new(),
        "-1" => "-".to_string(),
        other => other.to_string(),
    };
    let pow = if power == 1 {
        String::new()
    } else {
        superscript(power)
    };
    format!("{coef}{var}{pow}")
}

/// Join `(coefficient, power)` pairs into `x² + 5x + 6`. Zero terms are
/// skipped; like powers are not merged here.
pub fn polynomial(terms: &[(f64, i64)], var: &str) -> String {
    let mut out = String::new();
    for &(c, p) in terms.iter().filter(|(c, _)| *c != 0.0) {
        if out.is_empty() {
            out.push_str(&term(c, p, var));
        } else if c < 0.0 {
            out.push_str(" - ");
            out.push_str(&term(-c, p, var));
        } else {
            out.push_str(" + ");
            out.push_str(&term(c, p, var));
        }
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Multiple of π, e.g. `π`, `2π`, `0.5π`.
pub fn pi_multiple(x: f64) -> String {
    let k = x / std::f64::consts::PI;
    match num(k).as_str() {
        "0" => "0".to_string(),
        "1" => "π".to_string(),
        "-1" => "-π".to_string(),
        other => format!("{other}π"),
    }
}

/// Comma list of numbers.
pub fn list(values: &[f64]) -> String {
    values.iter().map(|v| num(*v)).collect::<Vec<_>>().join(", ")
}
