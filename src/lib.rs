//! # belfiore-rs
//!
//! Umbrella crate re-exporting [`belfiore_core`], so demos and downstream
//! code can `use belfiore_rs::prelude::*`.

pub use belfiore_core::*;

pub mod prelude {
    pub use belfiore_core::prelude::*;
}

/// Small in-memory dataset used by the demos.
pub const DEMO_DATASET: &str = r#"{
    "licenses": ["CC-BY-4.0", "IODL-2.0"],
    "sources": [
        {
            "belfioreCode": "1j73jo52l7adauj",
            "provinceOrCountry": "PLFCMIRMTO",
            "name": "Capodistria|Forlì|Milano|Roma|Torino",
            "expirationDate": "0utj",
            "dataSource": "2k"
        },
        {
            "belfioreCode": "ogmogoops",
            "provinceOrCountry": "FRDEUS",
            "name": "Francia|Germania|Stati Uniti d'America",
            "dataSource": "0"
        }
    ]
}"#;

/// Parses [`DEMO_DATASET`] into a ready connector.
pub fn demo_connector() -> Result<Connector> {
    Ok(Connector::from_dataset(Dataset::from_reader(DEMO_DATASET.as_bytes())?))
}
