// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::budget::{BucketStatus, BudgetReport, BufferStatus, InvestmentStatus};

/// Rendered email bodies for one budget report. Delivery is someone else's
/// job; this module only produces content.
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
    pub text: String,
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn bucket_badge(status: BucketStatus) -> &'static str {
    match status {
        BucketStatus::Ok | BucketStatus::Warning => "✅",
        BucketStatus::Exceeded => "⚠️ EXCEEDED",
    }
}

fn bucket_class(status: BucketStatus) -> &'static str {
    match status {
        BucketStatus::Ok => "",
        BucketStatus::Warning => "warning",
        BucketStatus::Exceeded => "exceeded",
    }
}

fn investment_badge(status: InvestmentStatus) -> &'static str {
    match status {
        InvestmentStatus::Ok => "✅",
        InvestmentStatus::BelowTarget => "📉 Below Target",
        InvestmentStatus::AboveMax => "📈 Above Max",
    }
}

fn buffer_badge(status: BufferStatus) -> &'static str {
    match status {
        BufferStatus::Ok => "✅",
        BufferStatus::Negative => "⚠️ NEGATIVE",
    }
}

fn bucket_section(
    title: &str,
    spent: Decimal,
    limit: Decimal,
    percent: Decimal,
    status: BucketStatus,
) -> String {
    let class = bucket_class(status);
    // Progress bars top out at 100% even when the budget is blown.
    let width = percent.min(Decimal::ONE_HUNDRED);
    format!(
        r#"<div class="budget-item {class}">
  <h3>{title} {badge}</h3>
  <div class="amount">${spent:.2} / ${limit:.2}</div>
  <div class="progress-bar"><div class="progress-fill {class}" style="width: {width:.0}%"></div></div>
  <p>{percent:.1}% of budget used</p>
  <p>Remaining: ${remaining:.2}</p>
</div>
"#,
        badge = bucket_badge(status),
        remaining = limit - spent,
    )
}

/// Render a budget report into subject plus HTML and plain-text bodies.
/// `generated_at` is display metadata supplied by the caller, e.g.
/// "November 05, 2025 at 09:00 AM".
pub fn render_budget_email(report: &BudgetReport, generated_at: &str) -> EmailContent {
    let subject = format!("Budget Report - {}", report.month);

    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
<style>
  body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
  .container { max-width: 600px; margin: 0 auto; padding: 20px; }
  .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 20px; border-radius: 10px 10px 0 0; }
  .content { background: #f9f9f9; padding: 20px; border-radius: 0 0 10px 10px; }
  .budget-item { background: white; padding: 15px; margin: 10px 0; border-radius: 8px; border-left: 4px solid #667eea; }
  .budget-item.exceeded { border-left-color: #ef4444; }
  .budget-item.warning { border-left-color: #f59e0b; }
  .progress-bar { background: #e5e7eb; height: 20px; border-radius: 10px; overflow: hidden; margin: 10px 0; }
  .progress-fill { height: 100%; background: #10b981; }
  .progress-fill.warning { background: #f59e0b; }
  .progress-fill.exceeded { background: #ef4444; }
  .amount { font-size: 24px; font-weight: bold; color: #667eea; }
  .category-list { list-style: none; padding: 0; }
  .category-list li { padding: 8px; background: white; margin: 5px 0; border-radius: 5px; }
  .footer { text-align: center; margin-top: 20px; color: #6b7280; font-size: 12px; }
</style>
</head>
<body>
<div class="container">
"#,
    );
    html.push_str(&format!(
        "<div class=\"header\"><h1>💰 Budget Report</h1><p>{}</p></div>\n<div class=\"content\">\n<h2>Budget Summary</h2>\n",
        escape(&report.month)
    ));

    html.push_str(&bucket_section(
        "Fixed Bills + Loans",
        report.fixed_bills_loans_spent,
        report.fixed_bills_loans_limit,
        report.fixed_bills_loans_percent,
        report.fixed_bills_loans_status,
    ));
    html.push_str(&bucket_section(
        "Variable Spending",
        report.variable_spending_spent,
        report.variable_spending_limit,
        report.variable_spending_percent,
        report.variable_spending_status,
    ));

    html.push_str(&format!(
        r#"<div class="budget-item">
  <h3>Investment {badge}</h3>
  <div class="amount">${total:.2}</div>
  <p>Target Range: ${min:.2} - ${max:.2}</p>
</div>
"#,
        badge = investment_badge(report.investment_status),
        total = report.investment_total,
        min = report.investment_min,
        max = report.investment_max,
    ));

    let buffer_color = match report.buffer_status {
        BufferStatus::Ok => "#10b981",
        BufferStatus::Negative => "#ef4444",
    };
    html.push_str(&format!(
        r#"<div class="budget-item {class}">
  <h3>Remaining Buffer {badge}</h3>
  <div class="amount" style="color: {buffer_color}">${buffer:.2}</div>
  <p>Income - (Bills/Loans + Variable Spending + Investment)</p>
</div>
"#,
        class = if report.buffer_status == BufferStatus::Negative {
            "exceeded"
        } else {
            ""
        },
        badge = buffer_badge(report.buffer_status),
        buffer = report.remaining_buffer,
    ));

    if !report.top_categories.is_empty() {
        html.push_str("<h3>Top Spending Categories</h3>\n<ul class=\"category-list\">\n");
        for entry in &report.top_categories {
            html.push_str(&format!(
                "<li><strong>{}:</strong> ${:.2}</li>\n",
                escape(&entry.category),
                entry.total
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str(&format!(
        r#"<div class="footer">
  <p>Generated on {generated_at}</p>
  <p>This is an automated budget report from Spendlog.</p>
</div>
</div>
</div>
</body>
</html>
"#,
    ));

    let mut text = format!("Budget Report - {}\n\n", report.month);
    text.push_str(&format!(
        "Fixed Bills + Loans: ${:.2} / ${:.2} ({:.1}%)\n",
        report.fixed_bills_loans_spent,
        report.fixed_bills_loans_limit,
        report.fixed_bills_loans_percent
    ));
    text.push_str(&format!(
        "Variable Spending: ${:.2} / ${:.2} ({:.1}%)\n",
        report.variable_spending_spent,
        report.variable_spending_limit,
        report.variable_spending_percent
    ));
    text.push_str(&format!(
        "Investment: ${:.2} (Target: ${:.2} - ${:.2})\n",
        report.investment_total, report.investment_min, report.investment_max
    ));
    text.push_str(&format!("Income: ${:.2}\n", report.income_total));
    text.push_str(&format!(
        "Remaining Buffer: ${:.2}\n",
        report.remaining_buffer
    ));
    if !report.top_categories.is_empty() {
        text.push_str("\nTop Spending Categories:\n");
        for entry in &report.top_categories {
            text.push_str(&format!("  {}: ${:.2}\n", entry.category, entry.total));
        }
    }
    text.push_str(&format!("\nGenerated on {}\n", generated_at));

    EmailContent {
        subject,
        html,
        text,
    }
}
