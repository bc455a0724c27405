use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FigError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(FigError::config("x").to_string().contains("config error:"));
    assert!(FigError::dataset("x").to_string().contains("dataset error:"));
    assert!(FigError::compile("x").to_string().contains("compile error:"));
    assert!(
        FigError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn wait_failures_name_what_was_awaited() {
    let err = FigError::TargetNotFound {
        target: "plotlyFigure12".to_string(),
        waited_ms: 1000,
    };
    let msg = err.to_string();
    assert!(msg.starts_with("target not found:"));
    assert!(msg.contains("plotlyFigure12"));
    assert!(msg.contains("1000ms"));

    let err = FigError::LibraryUnavailable { waited_ms: 250 };
    assert!(err.to_string().starts_with("library unavailable:"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: FigError = serde_json::from_str::<Vec<u8>>("[").unwrap_err().into();
    assert!(matches!(err, FigError::Serde(_)));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FigError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
