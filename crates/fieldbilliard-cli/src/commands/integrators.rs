use crate::cli::IntegratorsArgs;
use crate::error::Result;
use fieldbilliard::engine::integrators::IntegratorKind;
use fieldbilliard::engine::registry;

fn describe(name: &str, kind: IntegratorKind) -> String {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    format!(
        "{:<18} {:>5}  {:<10} {:<13} {}",
        name,
        kind.order(),
        yes_no(kind.is_symplectic()),
        yes_no(kind.requires_separable()),
        kind
    )
}

pub fn listing(args: &IntegratorsArgs) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<18} {:>5}  {:<10} {:<13} {}",
        "NAME", "ORDER", "SYMPLECTIC", "SEPARABLE-ONLY", "METHOD"
    )];
    lines.extend(registry::presets().map(|(name, kind)| describe(name, kind)));
    if args.aliases {
        lines.push(String::new());
        lines.push("Legacy aliases:".to_string());
        lines.extend(
            registry::aliases()
                .into_iter()
                .map(|(name, kind)| format!("  {:<16} -> {}", name, kind)),
        );
    }
    lines
}

pub fn run(args: IntegratorsArgs) -> Result<()> {
    for line in listing(&args) {
        println!("{}", line);
    }
    Ok(())
}
