use common::AnalysisConfig;
use model::{Literal, ModelError, Rule, Term};
use stratifier::Stratifier;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ModelError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let rules = builtin_rules()?;
    info!("Loaded built-in rule set (rules={})", rules.len());
    for (i, rule) in rules.iter().enumerate() {
        info!("  [{}] {}", i, rule);
    }

    let config = AnalysisConfig::default();
    info!("Configuration: {}", config);

    let stratifier = Stratifier::from_rules(&rules, &config);
    info!("Dependency Graph:{}", stratifier.dependency_graph());
    let recursive_cnt = stratifier
        .is_recursive_stratum_bitmap()
        .iter()
        .filter(|b| **b)
        .count();
    info!(
        "Stratification ({} strata, {} recursive, {} components):{}",
        stratifier.strata().len(),
        recursive_cnt,
        stratifier.components().len(),
        stratifier
    );
    Ok(())
}

/// `?X` is universal, `!Y` existential, anything else a constant.
fn term(text: &str) -> Term {
    if let Some(name) = text.strip_prefix('?') {
        Term::universal(name)
    } else if let Some(name) = text.strip_prefix('!') {
        Term::existential(name)
    } else {
        Term::constant(text)
    }
}

fn atom(predicate: &str, args: &[&str]) -> Literal {
    Literal::new(predicate, args.iter().map(|a| term(a)).collect())
}

fn builtin_rules() -> Result<Vec<Rule>, ModelError> {
    Ok(vec![
        Rule::new(vec![atom("student", &["?X"])], vec![atom("person", &["?X"])])?,
        Rule::new(
            vec![atom("person", &["?X"])],
            vec![atom("hasParent", &["?X", "!Y"])],
        )?,
        Rule::new(
            vec![atom("hasParent", &["?X", "?Y"])],
            vec![atom("person", &["?Y"])],
        )?,
        Rule::new(
            vec![atom("hasParent", &["?X", "?Y"])],
            vec![atom("ancestor", &["?X", "?Y"])],
        )?,
        Rule::new(
            vec![atom("ancestor", &["?X", "?Y"]), atom("ancestor", &["?Y", "?Z"])],
            vec![atom("ancestor", &["?X", "?Z"])],
        )?,
        Rule::new(
            vec![atom("selfParented", &["?X"])],
            vec![atom("hasParent", &["?X", "?X"])],
        )?,
        Rule::new(
            vec![atom("person", &["?X"]), atom("student", &["?X"])],
            vec![atom("student", &["?X"])],
        )?,
        Rule::new(vec![atom("enrolled", &["?X", "course"])], vec![atom("student", &["?X"])])?,
    ])
}
