use apicompat_core::RuleRegistry;
use apicompat_core::{log_op_end, log_op_start};

/// Sorted names of the built-in rules
pub fn list_rules() -> Vec<&'static str> {
    log_op_start!("list_rules");
    let start = std::time::Instant::now();

    let rules = apicompat_core::list_rules(&RuleRegistry::builtin());

    log_op_end!(
        "list_rules",
        duration_ms = start.elapsed().as_millis() as u64,
        rules = rules.len()
    );
    rules
}
