//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use parentele_domain::{ActorId, RelationExtraction, RelationMode, RelationPreview, Statut};
use parentele_recompute::RecomputeMetrics;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format stored or previewed relation rows.
    pub fn format_relations(&self, rows: &[RelationPreview]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
            OutputFormat::Table => Ok(self.format_relations_table(rows)),
        }
    }

    fn format_relations_table(&self, rows: &[RelationPreview]) -> String {
        if rows.is_empty() {
            return self.colorize("No relations found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Source", "Relation", "Precision", "Target", "Mode", "Statut", "Mention"]);

        for row in rows {
            let source = format!("{} ({})", row.acteur_source_id, or_dash(row.acteur_source_role.as_deref()));
            let target = match &row.acteur_cible_id {
                Some(id) => format!("{} ({})", id, or_dash(row.acteur_cible_role.as_deref())),
                None => format!("- ({})", or_dash(row.acteur_cible_role.as_deref())),
            };
            let statut = self.statut(row.statut);
            builder.push_record([
                source.as_str(),
                or_dash(row.relation_type.as_deref()),
                or_dash(row.relation_precision.as_deref()),
                target.as_str(),
                row.relation_mode.as_str(),
                statut.as_str(),
                row.source_mention.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let implicit = rows.iter().filter(|r| r.relation_mode == RelationMode::Implicite).count();
        format!("{}\n{} row(s), {} implicit", table, rows.len(), implicit)
    }

    /// Format the extractions of one phrase.
    pub fn format_extractions(&self, extractions: &[RelationExtraction]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(extractions)?),
            OutputFormat::Table => Ok(self.format_extractions_table(extractions)),
        }
    }

    fn format_extractions_table(&self, extractions: &[RelationExtraction]) -> String {
        if extractions.is_empty() {
            return self.colorize("Nothing to extract.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Fragment", "Relation", "Precision", "Target role", "Target", "Statut"]);

        for extraction in extractions {
            let statut = self.statut(extraction.statut);
            builder.push_record([
                extraction.mention.as_str(),
                or_dash(extraction.relation_type.as_deref()),
                or_dash(extraction.relation_precision.as_deref()),
                or_dash(extraction.role_cible.as_deref()),
                or_dash(extraction.acteur_cible_id.as_ref().map(ActorId::as_str)),
                statut.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format the metrics of a recompute run.
    pub fn format_metrics(&self, metrics: &RecomputeMetrics) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let by_statut: serde_json::Map<String, serde_json::Value> = Statut::all()
                    .into_iter()
                    .map(|s| (s.to_string(), metrics.rows_with_statut(s).into()))
                    .collect();
                let value = serde_json::json!({
                    "acts_processed": metrics.acts_processed,
                    "acts_failed": metrics.acts_failed,
                    "actors_processed": metrics.actors_processed,
                    "rows_deleted": metrics.rows_deleted,
                    "rows_explicite": metrics.rows_with_mode(RelationMode::Explicite),
                    "rows_implicite": metrics.rows_with_mode(RelationMode::Implicite),
                    "role_rows": metrics.role_rows,
                    "rows_by_statut": by_statut,
                    "total_runtime_ms": metrics.total_runtime_ms as u64,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => Ok(metrics.summary()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn statut(&self, statut: Statut) -> String {
        let color = match statut {
            Statut::Unique => "green",
            Statut::Ambigu => "yellow",
            Statut::Introuvable => "magenta",
            Statut::Erreur => "red",
        };
        self.colorize(statut.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(mode: RelationMode, cible: Option<&str>) -> RelationPreview {
        RelationPreview {
            acte_id: "12".to_string(),
            source_table: "actes_naissance".to_string(),
            acteur_source_id: ActorId::new("a1"),
            acteur_source_role: Some("parrain".to_string()),
            acteur_cible_id: cible.map(ActorId::new),
            acteur_cible_role: Some("enfant".to_string()),
            relation_type: Some("oncle".to_string()),
            relation_mode: mode,
            relation_precision: Some("paternel".to_string()),
            source_mention: "oncle paternel de l'enfant".to_string(),
            statut: if cible.is_some() { Statut::Unique } else { Statut::Introuvable },
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_relations(&[
                relation(RelationMode::Explicite, Some("a2")),
                relation(RelationMode::Implicite, None),
            ])
            .unwrap();
        assert!(output.contains("Relation"));
        assert!(output.contains("a2 (enfant)"));
        assert!(output.contains("introuvable"));
        assert!(output.contains("2 row(s), 1 implicit"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_relations(&[relation(RelationMode::Explicite, Some("a2"))])
            .unwrap();
        let parsed: Vec<RelationPreview> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0].acteur_cible_id, Some(ActorId::new("a2")));
        assert!(output.contains("\"explicite\""));
    }

    #[test]
    fn test_empty_relations() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_relations(&[]).unwrap();
        assert!(output.contains("No relations found"));
    }

    #[test]
    fn test_extractions_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_extractions(&[RelationExtraction::erreur("voisin")])
            .unwrap();
        assert!(output.contains("voisin"));
        assert!(output.contains("erreur"));
    }

    #[test]
    fn test_metrics_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let mut metrics = RecomputeMetrics::new();
        metrics.record_act();
        metrics.record_failure();
        let output = formatter.format_metrics(&metrics).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["acts_processed"], 1);
        assert_eq!(value["acts_failed"], 1);
        assert_eq!(value["rows_by_statut"]["unique"], 0);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
