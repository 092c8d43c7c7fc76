//! Rust Code Emitter
//!
//! Generates a Rust enum from an EnumRegion. Every predicate becomes an
//! `is_*` method, and `matches` keeps the name-based lookup available.

use crate::config::CodegenConfig;
use crate::enumeration::Enumeration;
use crate::error::Result;

use super::{EnumRegion, VariantDef};

// =============================================================================
// Public API
// =============================================================================

/// Render an enumeration as Rust source
pub fn emit_enumeration(enumeration: &Enumeration, type_name: &str, config: &CodegenConfig) -> Result<String> {
    let region = EnumRegion::build(enumeration, type_name)?;
    Ok(emit_region(&region, config))
}

/// Render a resolved region as Rust source
pub fn emit_region(region: &EnumRegion, config: &CodegenConfig) -> String {
    let mut output = String::new();
    emit_type(&mut output, region, config);
    output.push('\n');
    emit_impl(&mut output, region);
    output.push('\n');
    emit_display(&mut output, region);
    output
}

// =============================================================================
// Type Emission
// =============================================================================

fn emit_type(output: &mut String, region: &EnumRegion, config: &CodegenConfig) {
    output.push_str(&format!("/// {}\n", region.type_name));

    let mut derives = config.derives.clone();
    if config.serde {
        derives.push("serde::Serialize".to_string());
        derives.push("serde::Deserialize".to_string());
    }
    if !derives.is_empty() {
        output.push_str(&format!("#[derive({})]\n", derives.join(", ")));
    }

    output.push_str(&format!("pub enum {} {{\n", region.type_name));
    for variant in &region.variants {
        if config.serde && variant.needs_rename {
            output.push_str(&format!("    #[serde(rename = {:?})]\n", variant.key));
        }
        output.push_str(&format!("    {},\n", variant.rust_name));
    }
    output.push_str("}\n");
}

// =============================================================================
// Method Emission
// =============================================================================

fn emit_match(output: &mut String, region: &EnumRegion, value: impl Fn(&VariantDef) -> String) {
    output.push_str("        match self {\n");
    for variant in &region.variants {
        output.push_str(&format!(
            "            {}::{} => {},\n",
            region.type_name,
            variant.rust_name,
            value(variant)
        ));
    }
    output.push_str("        }\n");
}

fn emit_impl(output: &mut String, region: &EnumRegion) {
    let name = &region.type_name;
    output.push_str(&format!("impl {} {{\n", name));

    output.push_str(&format!(
        "    pub const ALL: [{}; {}] = [{}];\n\n",
        name,
        region.variants.len(),
        region
            .variants
            .iter()
            .map(|v| format!("{}::{}", name, v.rust_name))
            .collect::<Vec<_>>()
            .join(", ")
    ));

    output.push_str("    pub fn id(&self) -> &'static str {\n");
    if region.variants.is_empty() {
        output.push_str("        match *self {}\n");
    } else {
        emit_match(output, region, |v| format!("{:?}", v.key));
    }
    output.push_str("    }\n\n");

    output.push_str("    pub fn name(&self) -> &'static str {\n        self.id()\n    }\n\n");

    output.push_str("    pub fn predicate_name(&self) -> &'static str {\n");
    if region.variants.is_empty() {
        output.push_str("        match *self {}\n");
    } else {
        emit_match(output, region, |v| format!("{:?}", v.predicate));
    }
    output.push_str("    }\n\n");

    output.push_str(
        "    pub fn matches(&self, predicate: &str) -> bool {\n        self.predicate_name() == predicate\n    }\n\n",
    );

    output.push_str("    pub fn from_id(id: &str) -> Option<Self> {\n");
    output.push_str("        match id {\n");
    for variant in &region.variants {
        output.push_str(&format!(
            "            {:?} => Some({}::{}),\n",
            variant.key, name, variant.rust_name
        ));
    }
    output.push_str("            _ => None,\n        }\n    }\n");

    for variant in &region.variants {
        output.push_str(&format!(
            "\n    pub fn {}(&self) -> bool {{\n        matches!(self, {}::{})\n    }}\n",
            variant.method, name, variant.rust_name
        ));
    }

    output.push_str("}\n");
}

fn emit_display(output: &mut String, region: &EnumRegion) {
    output.push_str(&format!("impl std::fmt::Display for {} {{\n", region.type_name));
    output.push_str("    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {\n");
    output.push_str("        f.write_str(self.id())\n");
    output.push_str("    }\n");
    output.push_str("}\n");
}
