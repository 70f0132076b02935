//! Plain-text rendering of calculation results for the terminal.
//!
//! Every renderer returns a `String` so output can be asserted on in tests
//! and written wherever the caller wants.

use rust_decimal::Decimal;
use salary_core::calculations::GrossResolution;
use salary_core::calculations::common::round_half_up;
use salary_core::{Product, SalaryCalculationResult, SalaryComparisonResult};

const LABEL_WIDTH: usize = 34;
const VALUE_WIDTH: usize = 18;

/// Formats `value` as BGN with comma thousands grouping and two decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_cli::report::format_currency;
///
/// assert_eq!(format_currency(dec!(4000)), "4,000.00 BGN");
/// assert_eq!(format_currency(dec!(-1141.68)), "-1,141.68 BGN");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{} BGN", group_thousands(rounded.abs()))
}

/// Like [`format_currency`], with an explicit `+` on increases.
pub fn format_difference(value: Decimal) -> String {
    let rounded = round_half_up(value);
    if rounded > Decimal::ZERO {
        format!("+{}", format_currency(rounded))
    } else {
        format_currency(rounded)
    }
}

/// Formats a percentage with two decimals and an explicit sign on non-zero
/// values.
pub fn format_percentage(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded > Decimal::ZERO {
        "+"
    } else if rounded < Decimal::ZERO {
        "-"
    } else {
        ""
    };
    format!("{sign}{:.2}%", rounded.abs())
}

/// Groups the integer digits of a non-negative amount with commas.
fn group_thousands(amount: Decimal) -> String {
    let text = format!("{amount:.2}");
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{grouped}.{fraction}")
}

fn line(
    label: &str,
    value: &str,
) -> String {
    format!("  {label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}")
}

fn pair_line(
    label: &str,
    a: &str,
    b: &str,
) -> String {
    format!("  {label:<LABEL_WIDTH$}{a:>VALUE_WIDTH$}{b:>VALUE_WIDTH$}")
}

/// Full employee and employer breakdown of one gross salary.
pub fn render_breakdown(
    result: &SalaryCalculationResult,
    year: i32,
) -> String {
    let employee = &result.employee_contributions;
    let employer = &result.employer_contributions;

    let lines = [
        format!("Salary breakdown for {year}"),
        line("Gross salary", &format_currency(result.gross_salary)),
        line("Contribution base", &format_currency(result.contribution_base)),
        String::new(),
        "Employee contributions".to_string(),
        line("Pension", &format_currency(employee.pension)),
        line("Sickness and maternity", &format_currency(employee.sickness)),
        line("Unemployment", &format_currency(employee.unemployment)),
        line(
            "Supplementary pension",
            &format_currency(employee.supplementary_pension),
        ),
        line("Health insurance", &format_currency(employee.health)),
        line(
            "Total",
            &format_currency(result.total_employee_contributions),
        ),
        String::new(),
        line("Taxable income", &format_currency(result.taxable_income)),
        line("Income tax", &format_currency(result.income_tax)),
        line("Net salary", &format_currency(result.net_salary)),
        String::new(),
        "Employer contributions".to_string(),
        line("Pension", &format_currency(employer.pension)),
        line("Sickness and maternity", &format_currency(employer.sickness)),
        line("Unemployment", &format_currency(employer.unemployment)),
        line(
            "Supplementary pension",
            &format_currency(employer.supplementary_pension),
        ),
        line(
            "Occupational accidents",
            &format_currency(employer.occupational_accidents),
        ),
        line("Health insurance", &format_currency(employer.health)),
        line(
            "Total",
            &format_currency(result.total_employer_contributions),
        ),
        line(
            "Total employer cost",
            &format_currency(result.total_employer_cost),
        ),
    ];

    lines.join("\n")
}

/// Side-by-side view of one gross salary under two years, with the deltas.
pub fn render_comparison(
    comparison: &SalaryComparisonResult,
    year_a: i32,
    year_b: i32,
) -> String {
    let a = &comparison.year_a;
    let b = &comparison.year_b;

    let lines = [
        format!("Salary comparison {year_a} -> {year_b}"),
        line("Gross salary", &format_currency(comparison.gross_salary())),
        String::new(),
        pair_line("", &year_a.to_string(), &year_b.to_string()),
        pair_line(
            "Net salary",
            &format_currency(a.net_salary),
            &format_currency(b.net_salary),
        ),
        pair_line(
            "Employee contributions",
            &format_currency(a.total_employee_contributions),
            &format_currency(b.total_employee_contributions),
        ),
        pair_line(
            "Income tax",
            &format_currency(a.income_tax),
            &format_currency(b.income_tax),
        ),
        pair_line(
            "Employer contributions",
            &format_currency(a.total_employer_contributions),
            &format_currency(b.total_employer_contributions),
        ),
        pair_line(
            "Total employer cost",
            &format_currency(a.total_employer_cost),
            &format_currency(b.total_employer_cost),
        ),
        String::new(),
        line(
            "Net salary change (monthly)",
            &format_difference(comparison.net_salary_difference),
        ),
        line(
            "Net salary change (annual)",
            &format_difference(comparison.annual_net_salary_difference),
        ),
        line(
            "Net salary change (%)",
            &format_percentage(comparison.percentage_change),
        ),
        line(
            "Employer cost change (monthly)",
            &format_difference(comparison.employer_cost_difference),
        ),
        line(
            "Employer cost change (annual)",
            &format_difference(comparison.annual_employer_cost_difference),
        ),
    ];

    lines.join("\n")
}

/// Result of resolving a gross salary from a net salary.
pub fn render_resolution(
    net_salary: Decimal,
    year: i32,
    resolution: &GrossResolution,
) -> String {
    let status = if resolution.converged {
        "yes".to_string()
    } else {
        format!(
            "no, closest estimate after {} iterations",
            resolution.iterations
        )
    };

    let lines = [
        format!("Gross salary for a net of {} in {year}", format_currency(net_salary)),
        line("Gross salary", &format_currency(resolution.gross_salary)),
        line("Iterations", &resolution.iterations.to_string()),
        line("Converged", &status),
    ];

    lines.join("\n")
}

/// How many units of each product an annual difference amounts to.
pub fn render_product_table(
    annual_difference: Decimal,
    losses: &[(&Product, u64)],
) -> String {
    let mut lines = vec![format!(
        "What {} a year buys",
        format_currency(annual_difference.abs())
    )];

    for (product, count) in losses {
        let label = format!(
            "{} ({} per {})",
            product.name,
            format_currency(product.price),
            product.unit
        );
        lines.push(line(&label, &count.to_string()));
    }

    lines.join("\n")
}

/// A single product count, for `--product` and `--price`.
pub fn render_product_loss(
    annual_difference: Decimal,
    label: &str,
    count: u64,
) -> String {
    format!(
        "{} a year is {count} x {label}",
        format_currency(annual_difference.abs())
    )
}
