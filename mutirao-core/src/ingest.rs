//! Dataset ingestion: CSV decoding plus the file and URL sources.
//!
//! Ingestion is the only asynchronous and the only fallible boundary of the
//! system; it is awaited once before the dashboard runs. Rows that fail the
//! basic validity rules (missing coordinates or total weight) are dropped
//! here and never reach the core, while malformed cells are typed errors
//! rather than silent zeroes.

use std::io::Read;
use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::DataError;
use crate::model::{ActionId, ActionRecord, WasteCategory, parse_date};

/// Raw CSV row with the dataset's column headers. Numeric cells decode to
/// `Option` so an empty cell is distinguishable from a malformed one: empty
/// means absent, garbage is a [`DataError::Csv`].
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "Data")]
    date: String,
    #[serde(rename = "Local_Nome")]
    location_name: String,
    #[serde(rename = "Municipio")]
    municipality: String,
    #[serde(rename = "Tipo_Acao")]
    action_type: String,
    #[serde(rename = "Latitude", default)]
    latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    longitude: Option<f64>,
    #[serde(rename = "Peso_Total_KG", default)]
    total_weight_kg: Option<f64>,
    #[serde(rename = "Num_Participantes", default)]
    participants: Option<u32>,
    #[serde(rename = "Redes_Pesca_KG", default)]
    fishing_nets_kg: Option<f64>,
    #[serde(rename = "Plastico_KG", default)]
    plastic_kg: Option<f64>,
    #[serde(rename = "Metal_KG", default)]
    metal_kg: Option<f64>,
    #[serde(rename = "Vidro_KG", default)]
    glass_kg: Option<f64>,
    #[serde(rename = "Papel_Papelao_KG", default)]
    paper_kg: Option<f64>,
    #[serde(rename = "Borracha_KG", default)]
    rubber_kg: Option<f64>,
    #[serde(rename = "Tecido_KG", default)]
    fabric_kg: Option<f64>,
    #[serde(rename = "Outros_KG", default)]
    other_kg: Option<f64>,
    #[serde(rename = "Observacoes", default)]
    observations: Option<String>,
}

/// Decode the dataset CSV into action records.
///
/// Rows without latitude, longitude, or total weight are skipped. Records
/// keep their file order; when the file carries no `id` column, stable
/// `acao-<line>` identifiers are synthesized from the row position.
///
/// # Errors
///
/// Returns a [`DataError`] when the CSV structure is broken, a numeric cell
/// does not parse, a date is malformed, or a weight is negative.
pub fn decode_csv<R: Read>(reader: R) -> Result<Vec<ActionRecord>, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, raw) in csv_reader.deserialize::<RawRow>().enumerate() {
        // header occupies line 1
        let line = index + 2;
        let raw = raw?;
        if let Some(record) = convert_row(raw, line)? {
            records.push(record);
        }
    }
    Ok(records)
}

fn convert_row(raw: RawRow, line: usize) -> Result<Option<ActionRecord>, DataError> {
    // The validity rule from the dataset export: no coordinates or no total
    // weight means the row is unusable for the map and is dropped.
    let (Some(latitude), Some(longitude), Some(total_weight_kg)) =
        (raw.latitude, raw.longitude, raw.total_weight_kg)
    else {
        return Ok(None);
    };

    let date = parse_date(&raw.date)?;

    let id = match raw.id {
        Some(id) if !id.is_empty() => ActionId(id),
        _ => ActionId(format!("acao-{line}")),
    };

    let record = ActionRecord {
        id,
        location_name: raw.location_name,
        municipality: raw.municipality,
        latitude,
        longitude,
        date,
        action_type: raw.action_type,
        total_weight_kg,
        participants: raw.participants.unwrap_or(0),
        fishing_nets_kg: raw.fishing_nets_kg.unwrap_or(0.0),
        plastic_kg: raw.plastic_kg.unwrap_or(0.0),
        metal_kg: raw.metal_kg.unwrap_or(0.0),
        glass_kg: raw.glass_kg.unwrap_or(0.0),
        paper_kg: raw.paper_kg.unwrap_or(0.0),
        rubber_kg: raw.rubber_kg.unwrap_or(0.0),
        fabric_kg: raw.fabric_kg.unwrap_or(0.0),
        other_kg: raw.other_kg.unwrap_or(0.0),
        observations: raw.observations.filter(|text| !text.is_empty()),
    };

    let negative = std::iter::once(record.total_weight_kg)
        .chain(
            WasteCategory::ALL
                .into_iter()
                .map(|category| record.category_weight_kg(category)),
        )
        .any(|weight| weight < 0.0);
    if negative {
        return Err(DataError::InvalidRow {
            line,
            reason: "negative weight".to_owned(),
        });
    }

    Ok(Some(record))
}

#[async_trait]
/// A place the dataset can be loaded from. Implementations perform the one
/// asynchronous step of the system; everything downstream is synchronous.
pub trait DatasetSource: Send + Sync {
    /// Human-readable description of the source, for status messages.
    fn describe(&self) -> String;

    /// Load and decode the full record set.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when the source is unreachable or the CSV
    /// fails to decode.
    async fn load(&self) -> Result<Vec<ActionRecord>, DataError>;
}

/// Dataset stored as a CSV file on disk.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    /// Create a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for CsvFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<ActionRecord>, DataError> {
        let bytes = tokio::fs::read(&self.path).await?;
        decode_csv(bytes.as_slice())
    }
}

/// Dataset published as a CSV document over HTTP, the way the original
/// dashboard fetched it.
pub struct CsvUrlSource {
    client: Client,
    url: String,
}

impl CsvUrlSource {
    /// Create a source fetching from `url` with the given client.
    #[must_use]
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for CsvUrlSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn load(&self) -> Result<Vec<ActionRecord>, DataError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        decode_csv(body.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::decode_csv;
    use crate::error::DataError;

    const HEADER: &str = "id,Data,Local_Nome,Municipio,Tipo_Acao,Latitude,Longitude,\
Peso_Total_KG,Redes_Pesca_KG,Plastico_KG,Metal_KG,Vidro_KG,Papel_Papelao_KG,\
Borracha_KG,Tecido_KG,Outros_KG,Num_Participantes,Observacoes";

    fn dataset(rows: &[&str]) -> String {
        let mut text = HEADER.to_owned();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn decodes_a_complete_row() {
        let csv_text = dataset(&[
            "ac-1,2024-03-09,Praia do Félix,Ubatuba,Limpeza de Praia,-23.39,-44.97,\
5.5,1.0,2.5,0.5,0.5,0.2,0.3,0.1,0.4,12,Maré baixa",
        ]);
        let records = decode_csv(csv_text.as_bytes()).expect("valid csv");
        assert_eq!(records.len(), 1);
        let record = records.first().expect("one record");
        assert_eq!(record.id.0, "ac-1");
        assert_eq!(record.municipality, "Ubatuba");
        assert_eq!(record.total_weight_kg, 5.5);
        assert_eq!(record.plastic_kg, 2.5);
        assert_eq!(record.participants, 12);
        assert_eq!(record.observations.as_deref(), Some("Maré baixa"));
    }

    #[test]
    fn rows_without_coordinates_or_weight_are_dropped() {
        let csv_text = dataset(&[
            "ac-1,2024-03-09,Praia A,Ubatuba,Limpeza de Praia,,-44.97,5.5,0,0,0,0,0,0,0,0,5,",
            "ac-2,2024-03-10,Praia B,Ubatuba,Limpeza de Praia,-23.39,,5.5,0,0,0,0,0,0,0,0,5,",
            "ac-3,2024-03-11,Praia C,Ubatuba,Limpeza de Praia,-23.39,-44.97,,0,0,0,0,0,0,0,0,5,",
            "ac-4,2024-03-12,Praia D,Ubatuba,Limpeza de Praia,-23.39,-44.97,2.0,0,0,0,0,0,0,0,0,5,",
        ]);
        let records = decode_csv(csv_text.as_bytes()).expect("valid csv");
        let ids: Vec<&str> = records.iter().map(|record| record.id.0.as_str()).collect();
        assert_eq!(ids, ["ac-4"]);
    }

    #[test]
    fn missing_id_column_gets_synthesized_identifiers() {
        let csv_text = "Data,Local_Nome,Municipio,Tipo_Acao,Latitude,Longitude,Peso_Total_KG\n\
2024-03-09,Praia A,Ubatuba,Limpeza de Praia,-23.39,-44.97,5.5\n\
2024-03-10,Praia B,Ubatuba,Limpeza de Praia,-23.40,-44.98,1.5";
        let records = decode_csv(csv_text.as_bytes()).expect("valid csv");
        let ids: Vec<&str> = records.iter().map(|record| record.id.0.as_str()).collect();
        assert_eq!(ids, ["acao-2", "acao-3"]);
    }

    #[test]
    fn empty_numeric_cells_default_to_zero() {
        let csv_text = dataset(&[
            "ac-1,2024-03-09,Praia A,Ubatuba,Limpeza de Praia,-23.39,-44.97,5.5,,,,,,,,,,",
        ]);
        let records = decode_csv(csv_text.as_bytes()).expect("valid csv");
        let record = records.first().expect("one record");
        assert_eq!(record.fishing_nets_kg, 0.0);
        assert_eq!(record.participants, 0);
        assert_eq!(record.observations, None);
    }

    #[test]
    fn malformed_numeric_cell_is_a_typed_error() {
        let csv_text = dataset(&[
            "ac-1,2024-03-09,Praia A,Ubatuba,Limpeza de Praia,-23.39,-44.97,muito,0,0,0,0,0,0,0,0,5,",
        ]);
        let err = decode_csv(csv_text.as_bytes()).expect_err("must reject");
        assert!(matches!(err, DataError::Csv(_)), "got {err}");
    }

    #[test]
    fn malformed_date_is_a_typed_error() {
        let csv_text = dataset(&[
            "ac-1,09/03/2024,Praia A,Ubatuba,Limpeza de Praia,-23.39,-44.97,5.5,0,0,0,0,0,0,0,0,5,",
        ]);
        let err = decode_csv(csv_text.as_bytes()).expect_err("must reject");
        assert!(matches!(err, DataError::Date(_)), "got {err}");
    }

    #[test]
    fn negative_weight_is_rejected_with_the_line_number() {
        let csv_text = dataset(&[
            "ac-1,2024-03-09,Praia A,Ubatuba,Limpeza de Praia,-23.39,-44.97,5.5,0,0,0,0,0,0,0,0,5,",
            "ac-2,2024-03-10,Praia B,Ubatuba,Limpeza de Praia,-23.39,-44.97,5.5,0,-1.0,0,0,0,0,0,0,5,",
        ]);
        let err = decode_csv(csv_text.as_bytes()).expect_err("must reject");
        match err {
            DataError::InvalidRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_yields_no_records() {
        let records = decode_csv(HEADER.as_bytes()).expect("header only");
        assert!(records.is_empty());
    }

    #[test]
    fn quoted_fields_with_commas_decode() {
        let csv_text = dataset(&[
            "ac-1,2024-03-09,\"Praia, do Félix\",Ubatuba,Limpeza de Praia,-23.39,-44.97,\
5.5,0,0,0,0,0,0,0,0,5,\"chuva, vento\"",
        ]);
        let records = decode_csv(csv_text.as_bytes()).expect("valid csv");
        let record = records.first().expect("one record");
        assert_eq!(record.location_name, "Praia, do Félix");
        assert_eq!(record.observations.as_deref(), Some("chuva, vento"));
    }
}
