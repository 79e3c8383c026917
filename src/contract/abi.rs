//! Credit contract interface and the static build artifact.

use std::fs;
use std::path::Path;

use alloy::json_abi::JsonAbi;
use alloy::primitives::Bytes;
use alloy::sol;
use serde::Deserialize;

use crate::contract::types::{ContractError, ContractResult};

sol! {
    /// Carbon-credit NFT surface used by the desk.
    #[sol(rpc)]
    #[derive(Debug)]
    contract CarbonCreditNFT {
        /// Emitted once per token when it is retired.
        event CreditRetired(uint256 indexed tokenId, address indexed owner);

        function ownerOf(uint256 tokenId) external view returns (address);
        function retired(uint256 tokenId) external view returns (bool);
        function retire(uint256 tokenId) external;
    }
}

const EMBEDDED_ARTIFACT: &str = include_str!("../../artifacts/CarbonCreditNFT.json");

/// Hardhat-style compilation artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    #[serde(default)]
    pub contract_name: String,
    pub abi: JsonAbi,
    /// Creation bytecode; `0x` when the artifact only carries the ABI.
    #[serde(default)]
    pub bytecode: Bytes,
}

impl Artifact {
    /// The artifact compiled into the binary.
    pub fn embedded() -> ContractResult<Self> {
        Self::from_json(EMBEDDED_ARTIFACT)
    }

    /// Load an artifact from disk.
    pub fn from_path(path: &Path) -> ContractResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ContractError::Configuration(format!(
                "Cannot read artifact {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ContractResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| ContractError::Configuration(format!("Malformed artifact: {}", e)))
    }

    /// Whether the artifact can be deployed.
    pub fn has_bytecode(&self) -> bool {
        !self.bytecode.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_artifact_exposes_retirement_abi() {
        let artifact = Artifact::embedded().unwrap();
        assert_eq!(artifact.contract_name, "CarbonCreditNFT");
        assert!(artifact.abi.function("retired").is_some());
        assert!(artifact.abi.function("retire").is_some());
        assert!(!artifact.has_bytecode());
    }

    #[test]
    fn test_artifact_with_bytecode() {
        let artifact = Artifact::from_json(r#"{"abi": [], "bytecode": "0x6080604052"}"#).unwrap();
        assert!(artifact.has_bytecode());
        assert_eq!(artifact.bytecode.len(), 5);
    }

    #[test]
    fn test_malformed_artifact() {
        let err = Artifact::from_json("{\"bytecode\": 12}").unwrap_err();
        assert!(matches!(err, ContractError::Configuration(_)));
    }

    #[test]
    fn test_missing_artifact_file() {
        let err = Artifact::from_path(Path::new("nowhere/CarbonCreditNFT.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read artifact"));
    }
}
