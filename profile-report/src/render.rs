//! Human-readable report text.

use crate::aggregate::Summary;

/// Render the summary as the multi-line report, listing the top `top`
/// ranked apps as `<users> <app>`.
pub fn render_report(summary: &Summary, top: usize) -> String {
    let mut lines = vec![
        format!("Number of users: {}", summary.total_users),
        format!(
            "Number of users with at least one social proof: {}. Non-expired: {}",
            summary.users_with_proofs, summary.users_with_proofs_nonexpired
        ),
        format!(
            "Number of users with at least one valid social proof: {}. Non-expired: {}",
            summary.users_with_valid_proofs, summary.users_with_valid_proofs_nonexpired
        ),
        format!(
            "Number of users with at least one application: {}. Non-expired: {}",
            summary.users_with_apps, summary.users_with_apps_nonexpired
        ),
        format!("Number of unique public apps: {}", summary.public_apps.len()),
        format!(
            "Number of users with a \"localhost\" app: {}",
            summary.users_with_loopback_app
        ),
        "App ranking".to_string(),
    ];

    lines.extend(
        summary
            .ranking
            .iter()
            .take(top)
            .map(|usage| format!("{} {}", usage.users, usage.app)),
    );

    lines.join("\n")
}
