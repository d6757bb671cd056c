use crate::store::PlanItem;

const RULE_WIDTH: usize = 80;

/// Fixed-width listing: id, keyword, age, status, category, then a total line.
pub fn render(items: &[PlanItem]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(items.len() + 5);
    lines.push(String::new());
    lines.push(row("ID", "주제", "연령", "상태", "카테고리"));
    lines.push("-".repeat(RULE_WIDTH));
    for it in items {
        lines.push(row(
            &it.id.to_string(),
            &it.keyword,
            or_na(it.target_age.as_deref()),
            &it.status,
            or_na(it.category.as_deref()),
        ));
    }
    lines.push(String::new());
    lines.push(format!("총 {}개 주제", items.len()));
    lines.join("\n")
}

fn row(id: &str, keyword: &str, age: &str, status: &str, category: &str) -> String {
    format!("{:<5} {:<40} {:<10} {:<12} {:<10}", id, keyword, age, status, category)
        .trim_end()
        .to_string()
}

fn or_na(v: Option<&str>) -> &str {
    v.filter(|s| !s.is_empty()).unwrap_or("N/A")
}
