//! Demonstrates resolving a small vocabulary and serializing the result.
//!
//! Run with: `cargo run --example dump_definitions -p lexigen-resolver`

use lexigen_resolver::{resolve_statements, LexiconTagger};
use lexigen_vocab::config::ResolverConfig;
use lexigen_vocab::model::{ClassStatement, InstanceStatement, PropertyStatement};

fn class(name: &str, parents: &[&str], comment: &str) -> ClassStatement {
    ClassStatement {
        name: name.to_owned(),
        parents: parents.iter().map(|s| (*s).to_owned()).collect(),
        comment: comment.to_owned(),
    }
}

fn property(name: &str, domains: &[&str], ranges: &[&str], comment: &str) -> PropertyStatement {
    PropertyStatement {
        name: name.to_owned(),
        domains: domains.iter().map(|s| (*s).to_owned()).collect(),
        ranges: ranges.iter().map(|s| (*s).to_owned()).collect(),
        comment: comment.to_owned(),
    }
}

fn main() {
    let classes = vec![
        class("Thing", &[], "The most generic type of item."),
        class("Intangible", &["Thing"], ""),
        class("Rating", &["Intangible"], "A rating or evaluation."),
        class("Enumeration", &["Intangible"], ""),
        class("CuisineType", &["Enumeration"], "A style of cooking."),
        class("Organization", &["Thing"], ""),
        class("Restaurant", &["Organization"], ""),
        class("Person", &["Thing"], ""),
    ];
    let properties = vec![
        property("name", &["Thing"], &["Text"], "The name of the item."),
        property("ratingValue", &["Rating"], &["Number"], "The rating itself."),
        property(
            "aggregateRating",
            &["Restaurant"],
            &["Rating"],
            "The overall rating of the item.",
        ),
        property(
            "servesCuisine",
            &["Restaurant"],
            &["CuisineType", "Text"],
            "The cuisine of the restaurant.",
        ),
        property(
            "worksFor",
            &["Person"],
            &["Organization"],
            "An organization the person works for.",
        ),
    ];
    let instances = vec![InstanceStatement {
        name: "ItalianCuisine".to_owned(),
        class_name: "CuisineType".to_owned(),
    }];

    let config = ResolverConfig::default();
    let resolution = match resolve_statements(&classes, &properties, &instances, &config, &LexiconTagger)
    {
        Ok(resolution) => resolution,
        Err(e) => {
            eprintln!("resolution failed: {e}");
            std::process::exit(1);
        }
    };

    println!("Resolved {} type definitions", resolution.definitions.len());
    for definition in &resolution.definitions {
        println!(
            "  {:16} {:>2} fields  (parents: {})",
            definition.name,
            definition.fields.len(),
            definition.parents.join(", "),
        );
    }
    println!();

    for diagnostic in &resolution.report.diagnostics {
        println!("  [{:?}] {}: {}", diagnostic.severity, diagnostic.phase, diagnostic.message);
    }

    let json = lexigen_vocab::serializer::to_json(&resolution.definitions);
    let json_str = serde_json::to_string_pretty(&json).unwrap_or_else(|e| format!("JSON error: {e}"));
    println!("JSON output ({} bytes)", json_str.len());
    println!("{json_str}");
}
