use super::format::{format_length, format_shape, format_value, human_count};
use super::table::Section;
use crate::domain::error::LlmCtlResult;
use crate::domain::model::{
    MetadataValue, ModelDescription, ModelInfo, ARCHITECTURE_KEY, PARAMETER_COUNT_KEY,
};
use std::io::Write;
use tracing::debug;

/// Number of system prompt lines shown before truncating with "..."
pub const SYSTEM_PREVIEW_LINES: usize = 2;

/// Render the full report for `description` into `w`.
///
/// Sections are written in a fixed order: Model, Parameters, Metadata,
/// Tensors, Projector, System, License, Capabilities. Metadata and Tensors
/// are only written when `verbose` is set; every other section except Model
/// is skipped when it has nothing to show. The only failure is a write error.
pub fn render<W: Write + ?Sized>(
    description: &ModelDescription,
    verbose: bool,
    w: &mut W,
) -> LlmCtlResult<()> {
    let sections = build_sections(description, verbose);
    debug!("Rendering {} report sections", sections.len());

    for section in &sections {
        section.write_to(w)?;
    }
    w.flush()?;
    Ok(())
}

/// Build every non-empty section in output order.
pub fn build_sections(description: &ModelDescription, verbose: bool) -> Vec<Section> {
    let mut sections = vec![Section::new("Model", model_rows(description))];

    let mut push = |title: &'static str, rows: Vec<Vec<String>>| {
        if !rows.is_empty() {
            sections.push(Section::new(title, rows));
        }
    };

    push("Parameters", parameter_rows(&description.parameters));
    if verbose {
        push("Metadata", metadata_rows(&description.model_info));
        push("Tensors", tensor_rows(description));
    }
    push("Projector", projector_rows(&description.projector_info));
    push("System", system_rows(&description.system));
    push("License", license_rows(&description.license));
    push(
        "Capabilities",
        description
            .capabilities
            .iter()
            .map(|capability| vec![capability.to_string()])
            .collect(),
    );

    sections
}

fn row<const N: usize>(cells: [&str; N]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

/// First value whose key contains `needle`, preferring `<arch>.<needle>`.
fn find_by_suffix<'a>(info: &'a ModelInfo, preferred: &str, needle: &str) -> Option<&'a MetadataValue> {
    info.get(preferred)
        .or_else(|| info.iter().find(|(key, _)| key.contains(needle)).map(|(_, value)| value))
}

fn model_rows(description: &ModelDescription) -> Vec<Vec<String>> {
    let info = &description.model_info;
    let details = &description.details;

    let architecture = info
        .get(ARCHITECTURE_KEY)
        .and_then(MetadataValue::as_str)
        .unwrap_or(&details.family);

    let parameters = if details.parameter_size.is_empty() {
        info.get(PARAMETER_COUNT_KEY)
            .and_then(MetadataValue::as_f64)
            .map(human_count)
            .unwrap_or_default()
    } else {
        details.parameter_size.clone()
    };

    let mut rows = vec![row(["architecture", architecture]), row(["parameters", &parameters])];

    let context = format!("{}.context_length", architecture);
    if let Some(value) = find_by_suffix(info, &context, "context_length") {
        rows.push(row(["context length", &format_length(value)]));
    }

    let embedding = format!("{}.embedding_length", architecture);
    if let Some(value) = find_by_suffix(info, &embedding, "embedding_length") {
        rows.push(row(["embedding length", &format_length(value)]));
    }

    rows.push(row(["quantization", &details.quantization_level]));
    rows
}

/// Parse `key value` lines. Duplicate keys (repeated `stop`) stay separate.
pub fn parameter_rows(parameters: &str) -> Vec<Vec<String>> {
    parameters
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(char::is_whitespace) {
            Some((key, value)) => row([key, value.trim()]),
            None => row([line, ""]),
        })
        .collect()
}

fn metadata_rows(info: &ModelInfo) -> Vec<Vec<String>> {
    info.iter()
        .map(|(key, value)| row([key, &format_value(value)]))
        .collect()
}

fn tensor_rows(description: &ModelDescription) -> Vec<Vec<String>> {
    description
        .tensors
        .iter()
        .map(|tensor| row([&tensor.name, &tensor.tensor_type, &format_shape(&tensor.shape)]))
        .collect()
}

fn projector_rows(info: &ModelInfo) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    if info.is_empty() {
        return rows;
    }

    let architecture = info.get(ARCHITECTURE_KEY).and_then(MetadataValue::as_str);
    if let Some(architecture) = architecture {
        rows.push(row(["architecture", architecture]));
    }

    if let Some(count) = info.get(PARAMETER_COUNT_KEY).and_then(MetadataValue::as_f64) {
        rows.push(row(["parameters", &human_count(count)]));
    }

    let architecture = architecture.unwrap_or_default();
    let embedding = format!("{}.vision.embedding_length", architecture);
    if let Some(value) = find_by_suffix(info, &embedding, "embedding_length") {
        rows.push(row(["embedding length", &format_length(value)]));
    }

    let projection = format!("{}.vision.projection_dim", architecture);
    if let Some(value) = find_by_suffix(info, &projection, "projection_dim") {
        rows.push(row(["dimensions", &format_length(value)]));
    }

    rows
}

/// First two non-empty lines, then "..." when more remain.
pub fn system_rows(system: &str) -> Vec<Vec<String>> {
    let lines: Vec<&str> = system
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();

    let mut rows: Vec<Vec<String>> = lines
        .iter()
        .take(SYSTEM_PREVIEW_LINES)
        .map(|line| row([line]))
        .collect();

    if lines.len() > SYSTEM_PREVIEW_LINES {
        rows.push(row(["..."]));
    }
    rows
}

/// Every line with trailing whitespace removed, minus trailing blank lines.
pub fn license_rows(license: &str) -> Vec<Vec<String>> {
    let mut lines: Vec<&str> = license.lines().map(str::trim_end).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.into_iter().map(|line| row([line])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Capability, ModelDetails, Tensor};

    fn details() -> ModelDetails {
        ModelDetails {
            family: "test".to_string(),
            parameter_size: "7B".to_string(),
            quantization_level: "FP16".to_string(),
        }
    }

    fn titles(sections: &[Section]) -> Vec<&'static str> {
        sections.iter().map(|section| section.title).collect()
    }

    #[test]
    fn test_model_section_always_first() {
        let sections = build_sections(&ModelDescription::default(), true);
        assert_eq!(titles(&sections), vec!["Model"]);
        assert_eq!(
            sections[0].rows,
            vec![row(["architecture", ""]), row(["parameters", ""]), row(["quantization", ""])]
        );
    }

    #[test]
    fn test_parameter_count_used_when_size_missing() {
        let mut description = ModelDescription::default();
        description
            .model_info
            .insert(PARAMETER_COUNT_KEY.to_string(), MetadataValue::Number(1_500_000_000.0));

        let rows = model_rows(&description);
        assert_eq!(rows[1], row(["parameters", "1.5B"]));
    }

    #[test]
    fn test_architecture_prefers_model_info() {
        let mut description = ModelDescription {
            details: details(),
            ..ModelDescription::default()
        };
        description
            .model_info
            .insert(ARCHITECTURE_KEY.to_string(), MetadataValue::from("llama"));
        description
            .model_info
            .insert("llama.context_length".to_string(), MetadataValue::Number(131072.0));

        let rows = model_rows(&description);
        assert_eq!(rows[0], row(["architecture", "llama"]));
        assert_eq!(rows[2], row(["context length", "131072"]));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_parameter_rows_keep_duplicates_and_order() {
        let rows = parameter_rows("\n\t\t\tstop never\n\t\t\tstop gonna\n\n  temperature   0.7  \n");
        assert_eq!(
            rows,
            vec![
                row(["stop", "never"]),
                row(["stop", "gonna"]),
                row(["temperature", "0.7"]),
            ]
        );
    }

    #[test]
    fn test_parameter_value_may_contain_spaces() {
        let rows = parameter_rows(r#"stop "<|start_header_id|> user""#);
        assert_eq!(rows, vec![row(["stop", r#""<|start_header_id|> user""#])]);
    }

    #[test]
    fn test_metadata_and_tensors_only_when_verbose() {
        let mut description = ModelDescription {
            details: details(),
            tensors: vec![Tensor::new("token_embd.weight", "Q4_K", vec![4096, 32000])],
            ..ModelDescription::default()
        };
        description
            .model_info
            .insert("some.flag".to_string(), MetadataValue::Bool(true));

        assert_eq!(titles(&build_sections(&description, false)), vec!["Model"]);
        assert_eq!(
            titles(&build_sections(&description, true)),
            vec!["Model", "Metadata", "Tensors"]
        );
    }

    #[test]
    fn test_system_rows_truncate_after_two_lines() {
        assert_eq!(
            system_rows("You are a pirate!\nAhoy, matey!\nWeigh anchor!\n\t\t\t"),
            vec![row(["You are a pirate!"]), row(["Ahoy, matey!"]), row(["..."])]
        );
        assert_eq!(
            system_rows("You are a pirate!\n\nAhoy, matey!   \n"),
            vec![row(["You are a pirate!"]), row(["Ahoy, matey!"])]
        );
        assert!(system_rows("  \n\t\n").is_empty());
    }

    #[test]
    fn test_license_rows_are_not_truncated() {
        let rows = license_rows("MIT License\n\nCopyright (c) 2024\nPermission is hereby granted  \n\n\n");
        assert_eq!(
            rows,
            vec![
                row(["MIT License"]),
                row([""]),
                row(["Copyright (c) 2024"]),
                row(["Permission is hereby granted"]),
            ]
        );
    }

    #[test]
    fn test_projector_without_known_keys_is_skipped() {
        let mut description = ModelDescription::default();
        description
            .projector_info
            .insert("clip.has_text_encoder".to_string(), MetadataValue::Bool(false));

        assert_eq!(titles(&build_sections(&description, false)), vec!["Model"]);
    }

    #[test]
    fn test_capability_display_names() {
        let description = ModelDescription {
            capabilities: vec![Capability::Completion, Capability::Other("audio".to_string())],
            ..ModelDescription::default()
        };
        let sections = build_sections(&description, false);
        assert_eq!(sections[1].rows, vec![row(["completion"]), row(["audio"])]);
    }

    #[test]
    fn test_render_reports_sink_failure() {
        struct FailingSink;

        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = render(&ModelDescription::default(), false, &mut FailingSink).unwrap_err();
        assert!(matches!(err, crate::domain::error::LlmCtlError::Io(_)));
    }
}
