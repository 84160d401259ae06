use std::collections::BTreeSet;
use std::path::PathBuf;

use hf_hub::api::sync::ApiRepo;

use crate::paligemma::PaligemmaError;

/// Download every safetensors shard listed in a sharded checkpoint index.
pub(crate) fn hub_load_safetensors(
    repo: &ApiRepo,
    json_file: &str,
) -> Result<Vec<PathBuf>, PaligemmaError> {
    let json_file = repo.get(json_file)?;
    let json_file = std::fs::File::open(json_file)?;
    let json: serde_json::Value = serde_json::from_reader(&json_file)?;

    shard_names(&json)?
        .iter()
        .map(|name| repo.get(name).map_err(PaligemmaError::from))
        .collect()
}

/// The distinct shard file names referenced by the `weight_map` of an index.
pub(crate) fn shard_names(index: &serde_json::Value) -> Result<BTreeSet<String>, PaligemmaError> {
    let weight_map = match index.get("weight_map") {
        Some(serde_json::Value::Object(map)) => map,
        _ => return Err(PaligemmaError::MissingWeightMap),
    };

    Ok(weight_map
        .values()
        .filter_map(|v| v.as_str())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shard_names_are_deduplicated() -> Result<(), PaligemmaError> {
        let index = serde_json::json!({
            "metadata": { "total_size": 1 },
            "weight_map": {
                "a.weight": "model-00001-of-00002.safetensors",
                "b.weight": "model-00002-of-00002.safetensors",
                "c.weight": "model-00001-of-00002.safetensors",
            }
        });

        let names: Vec<_> = shard_names(&index)?.into_iter().collect();

        assert_eq!(
            names,
            vec![
                "model-00001-of-00002.safetensors",
                "model-00002-of-00002.safetensors"
            ]
        );
        Ok(())
    }

    #[test]
    fn shard_names_missing_weight_map() {
        let index = serde_json::json!({ "metadata": {} });
        assert!(matches!(
            shard_names(&index),
            Err(PaligemmaError::MissingWeightMap)
        ));
    }
}
