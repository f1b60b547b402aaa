use crate::core::Storage;
use crate::domain::model::{DataFileSpec, DataFormat, DataSourceType};
use crate::utils::error::{CallError, Result};
use serde_json::{Map, Value};

const DATA_SOURCE: &str = "dataSource";

/// 解析請求範本
pub fn parse_template(bytes: &[u8], path: &str) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| CallError::parse(format!("template {}", path), e))
}

/// Rewrites the template's `dataSource` for the given data file.
///
/// Without a data file the template is returned as loaded. An unsupported extension
/// fails before the data file is touched.
pub async fn build_request<S: Storage>(
    storage: &S,
    mut template: Value,
    data: Option<&DataFileSpec>,
) -> Result<Value> {
    let Some(spec) = data else {
        tracing::debug!("No data file given, sending template dataSource unchanged");
        return Ok(template);
    };

    let format = DataFormat::from_path(&spec.path).ok_or_else(|| CallError::UnsupportedFormat {
        path: spec.path.clone(),
    })?;

    let inline_data = if spec.send_inline {
        Some(load_inline_data(storage, &spec.path, format).await?)
    } else {
        None
    };

    let source = data_source_mut(&mut template)?;
    source.insert("fileName".to_string(), Value::Null);
    source.insert("data".to_string(), Value::Null);
    source.insert(
        "type".to_string(),
        Value::String(spec.source_type().as_str().to_string()),
    );

    match spec.source_type() {
        DataSourceType::Internal => {
            source.insert("data".to_string(), inline_data.unwrap_or(Value::Null));
        }
        DataSourceType::File => {
            source.insert("fileName".to_string(), Value::String(spec.path.clone()));
        }
    }
    source.insert(
        "format".to_string(),
        Value::String(format.as_str().to_string()),
    );

    if let Some(separator) = &spec.field_separator {
        match format {
            DataFormat::Csv => {
                source.insert("fieldSep".to_string(), Value::String(separator.clone()));
            }
            DataFormat::Json => {
                tracing::warn!(
                    "Field separator '{}' ignored for JSON data file {}",
                    separator,
                    spec.path
                );
            }
        }
    }

    tracing::debug!(
        "Prepared dataSource: type={}, format={}, file={}",
        spec.source_type().as_str(),
        format.as_str(),
        spec.path
    );

    Ok(template)
}

async fn load_inline_data<S: Storage>(storage: &S, path: &str, format: DataFormat) -> Result<Value> {
    let bytes = storage.read_file(path).await?;
    tracing::debug!("Embedding {} bytes from {}", bytes.len(), path);

    match format {
        DataFormat::Csv => {
            let text = String::from_utf8(bytes).map_err(|e| {
                CallError::file(
                    path,
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                )
            })?;
            Ok(Value::String(text))
        }
        DataFormat::Json => serde_json::from_slice(&bytes)
            .map_err(|e| CallError::parse(format!("data file {}", path), e)),
    }
}

fn data_source_mut(template: &mut Value) -> Result<&mut Map<String, Value>> {
    let root = template
        .as_object_mut()
        .ok_or_else(|| CallError::TemplateError {
            message: "template root is not a JSON object".to_string(),
        })?;

    root.entry(DATA_SOURCE)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| CallError::TemplateError {
            message: format!("'{}' is not a JSON object", DATA_SOURCE),
        })
}
