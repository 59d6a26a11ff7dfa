use anyhow::Result;
use company_registry::{
    CompanyRecord, CompanyStore, Format, LocalStorage, RegistryError, TomlConfig,
};
use tempfile::TempDir;

fn seed(store: &mut CompanyStore<LocalStorage>) -> Result<()> {
    store.add("900100", "Alpha Ltda", "Calle 1 #2-3", "1500000")?;
    store.add("900200", "Café Ñandú", "Bogotá, Colombia", "250000.75")?;
    store.add("900300", "Gamma \"G\" Corp", "Av. 68", "1e-3")?;
    Ok(())
}

#[test]
fn test_json_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("companies.json");

    let mut store = CompanyStore::new(LocalStorage::default(), &path);
    seed(&mut store)?;
    let original: Vec<CompanyRecord> = store.records().to_vec();

    let mut reloaded = CompanyStore::new(LocalStorage::default(), temp_dir.path().join("x.txt"));
    let summary = reloaded.import(&path)?;

    assert_eq!(summary.skip_count(), 0);
    assert_eq!(reloaded.records(), original.as_slice());
    Ok(())
}

#[test]
fn test_padded_fields_survive_json_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("companies.json");

    let mut store = CompanyStore::new(LocalStorage::default(), &path);
    store.add("1", "One", "Addr 1", "10")?;
    assert!(matches!(
        store.add(" 1", "Shadow", "Addr", "1"),
        Err(RegistryError::DuplicateId { .. })
    ));
    store.add("3", " Padded ", "  Addr 3 ", "30")?;

    let mut reloaded = CompanyStore::new(LocalStorage::default(), temp_dir.path().join("r.txt"));
    let summary = reloaded.import(&path)?;

    assert_eq!(summary.skip_count(), 0);
    assert_eq!(reloaded.records(), store.records());
    assert_eq!(reloaded.find("3").unwrap().name, "Padded");
    Ok(())
}

#[test]
fn test_delimited_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("companies.txt");

    let mut store = CompanyStore::new(LocalStorage::default(), &path);
    seed(&mut store)?;

    let mut reloaded = CompanyStore::new(LocalStorage::default(), temp_dir.path().join("y.txt"));
    reloaded.import(&path)?;

    assert_eq!(reloaded.records(), store.records());
    Ok(())
}

#[test]
fn test_csv_round_trip_with_quoting() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("companies.csv");

    let mut store = CompanyStore::new(LocalStorage::default(), &path);
    seed(&mut store)?;

    let written = std::fs::read_to_string(&path)?;
    assert!(written.starts_with("id,name,address,budget\n"));
    assert!(written.contains("\"Bogotá, Colombia\""));

    let mut reloaded = CompanyStore::new(LocalStorage::default(), temp_dir.path().join("z.txt"));
    reloaded.import(&path)?;
    assert_eq!(reloaded.records(), store.records());
    Ok(())
}

#[test]
fn test_every_mutation_rewrites_the_bound_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("companies.txt");
    let mut store = CompanyStore::new(LocalStorage::default(), &path);

    store.add("1", "One", "Addr 1", "10")?;
    assert_eq!(std::fs::read_to_string(&path)?, "1|One|Addr 1|10\n");

    store.update("1", "1", "One", "Addr 1", "12.5")?;
    assert_eq!(std::fs::read_to_string(&path)?, "1|One|Addr 1|12.5\n");

    store.add("2", "Two", "Addr 2", "20")?;
    store.delete("1")?;
    assert_eq!(std::fs::read_to_string(&path)?, "2|Two|Addr 2|20\n");
    Ok(())
}

#[test]
fn test_import_rebinds_auto_save_target() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let default_path = temp_dir.path().join("companies.txt");
    let json_path = temp_dir.path().join("imported.json");
    std::fs::write(
        &json_path,
        r#"[{"nit": "5", "nombre": "Cinco", "direccion": "Calle 5", "presupuesto": "$5,000"}]"#,
    )?;

    let mut store = CompanyStore::new(LocalStorage::default(), &default_path);
    store.add("1", "One", "Addr 1", "10")?;
    store.import(&json_path)?;
    store.add("6", "Seis", "Calle 6", "6")?;

    assert_eq!(store.binding().format, Format::Json);
    assert_eq!(std::fs::read_to_string(&default_path)?, "1|One|Addr 1|10\n");

    let saved: Vec<CompanyRecord> = serde_json::from_str(&std::fs::read_to_string(&json_path)?)?;
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].id, "5");
    assert_eq!(saved[0].budget, 5000.0);
    assert_eq!(saved[1].name, "Seis");
    Ok(())
}

#[test]
fn test_open_with_config_auto_loads_and_survives_corruption() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_path = temp_dir.path().join("companies.json");
    let config_text = format!(
        "[store]\ndefault_path = \"{}\"\n",
        data_path.to_string_lossy().replace('\\', "/")
    );
    let config = TomlConfig::from_toml_str(&config_text)?;

    std::fs::write(&data_path, r#"[{"id": "1", "name": "One", "address": "A"}]"#)?;
    let store = CompanyStore::open(LocalStorage::default(), &config);
    assert_eq!(store.len(), 1);

    std::fs::write(&data_path, "[{\"id\": \"1\",")?;
    let store = CompanyStore::open(LocalStorage::default(), &config);
    assert!(store.is_empty());
    assert_eq!(store.binding().path, data_path);
    Ok(())
}

#[test]
fn test_export_to_json_keeps_binding() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("companies.txt");
    let export_path = temp_dir.path().join("exports").join("snapshot.json");

    let mut store = CompanyStore::new(LocalStorage::default(), &path);
    seed(&mut store)?;
    store.export_to(&export_path)?;

    let exported = std::fs::read_to_string(&export_path)?;
    assert!(exported.contains("Café Ñandú"));
    assert!(exported.contains("\"budget\": 1500000.0"));
    assert_eq!(store.binding().path, path);
    Ok(())
}

#[test]
fn test_duplicate_add_does_not_touch_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("companies.txt");
    let mut store = CompanyStore::new(LocalStorage::default(), &path);
    seed(&mut store)?;
    let before = std::fs::read_to_string(&path)?;

    let err = store.add("900100", "Dup", "Addr", "1").unwrap_err();

    assert!(matches!(err, RegistryError::DuplicateId { .. }));
    assert_eq!(std::fs::read_to_string(&path)?, before);
    assert_eq!(store.len(), 3);
    Ok(())
}
