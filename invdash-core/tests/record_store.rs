use invdash_core::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const INVENTORY: &str = "\
Componente;Resultado;Cultivos Asociados;Producto N°;Descripción;Estado
1;1.1;Arroz, Café;1;Guía de manejo;Terminado
1;1.2;Banano;2;Protocolo;En curso
2;2.1;Caña de azucar;3;Informe;Terminado
";

const EDGES: &str = "\
Origen,Destino,Periodicidad de la Interacción,Tipo de Interacción
Productores,Extensionistas,4,Asesoría
Extensionistas,Investigadores,2,Datos
fila,rota,1,x,sobrante
Investigadores,Productores,1,Transferencia
";

const INTERPRETATION: &str = "\
Actor;Centralidad
Actor;Centralidad
Productores;0.8
";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "inventario.csv", INVENTORY);
    write(dir.path(), "arroz.csv", EDGES);
    write(dir.path(), "arroz_interpretacion.csv", INTERPRETATION);
    write(
        dir.path(),
        "dashboard.json",
        r#"{
            "title": "Inventario",
            "inventory": {
                "path": "inventario.csv",
                "facets": [
                    {"column": "Componente", "kind": "exact"},
                    {"column": "Resultado", "kind": "exact"},
                    {"column": "Cultivos Asociados", "kind": "multi_value"}
                ],
                "title_column": "Producto N°",
                "card_columns": ["Descripción", "Cultivos Asociados", "Estado"]
            },
            "networks": [
                {"name": "Arroz", "edges": "arroz.csv", "interpretation": "arroz_interpretacion.csv"}
            ],
            "node_categories": [
                {"contains": ["Productores"], "color": "lightblue"}
            ],
            "galleries": [
                {"name": "Arroz", "dir": "img", "stem": "Arroz", "count": 5}
            ]
        }"#,
    );
    dir
}

#[test]
fn test_load_config_and_inventory() {
    let dir = workspace();
    let config = load_config(dir.path().join("dashboard.json")).unwrap();
    let table = load_table(&config.inventory_source().unwrap()).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.records()[0].get("Producto N°"), Some("1"));

    let result = resolve_cascade(&table, &config.inventory.facets, &Default::default()).unwrap();
    assert_eq!(result.steps[0].options, vec!["1", "2"]);
    assert_eq!(result.outcome.len(), 1);
}

#[test]
fn test_missing_facet_column_in_file() {
    let dir = workspace();
    write(dir.path(), "inventario.csv", "Componente;Resultado\n1;1.1\n");
    let config = load_config(dir.path().join("dashboard.json")).unwrap();

    let err = load_table(&config.inventory_source().unwrap()).unwrap_err();
    assert!(matches!(
        err,
        DashboardError::UnknownFacet { ref facet, .. } if facet == "Cultivos Asociados"
    ));
}

#[test]
fn test_missing_inventory_file() {
    let dir = workspace();
    fs::remove_file(dir.path().join("inventario.csv")).unwrap();
    let config = load_config(dir.path().join("dashboard.json")).unwrap();

    let err = load_table(&config.inventory_source().unwrap()).unwrap_err();
    assert!(matches!(err, DashboardError::SourceUnreadable { .. }));
}

#[test]
fn test_latin1_file_is_decoded() {
    let dir = workspace();
    let mut bytes = b"Componente;Resultado;Cultivos Asociados\n1;1.1;Caf".to_vec();
    bytes.push(0xE9);
    bytes.push(b'\n');
    fs::write(dir.path().join("inventario.csv"), bytes).unwrap();
    let config = load_config(dir.path().join("dashboard.json")).unwrap();

    let table = load_table(&config.inventory_source().unwrap()).unwrap();
    assert_eq!(table.records()[0].get("Cultivos Asociados"), Some("Café"));
}

#[test]
fn test_network_and_interpretation() {
    let dir = workspace();
    let config = load_config(dir.path().join("dashboard.json")).unwrap();
    let view = config.network("Arroz").unwrap();

    let source = config.edges_source(view);
    let edges = load_table(&source).unwrap();
    assert_eq!(edges.len(), 3);

    let graph = RelationshipGraph::from_table(&edges, &config.network_columns, &source.path).unwrap();
    assert_eq!(graph.nodes().len(), 3);
    assert_eq!(graph.weighted_degree("Productores"), 5.0);

    let interp = load_table(&config.interpretation_source(view).unwrap()).unwrap();
    assert_eq!(interp.len(), 1);
    assert_eq!(interp.records()[0].get("Centralidad"), Some("0.8"));
}

#[test]
fn test_gallery_from_config() {
    let dir = workspace();
    let config = load_config(dir.path().join("dashboard.json")).unwrap();
    let gallery = config.gallery("Arroz").unwrap();

    let files = gallery_files(gallery);
    assert_eq!(files.len(), 5);
    assert_eq!(files[4].path, Path::new("img").join("Arroz5.jpg"));

    let page = PageState::new(files.len(), gallery.page_size).next();
    assert_eq!(files[page.range()].len(), 2);
}

#[test]
fn test_invalid_config_reports_all_problems() {
    let dir = workspace();
    write(
        dir.path(),
        "broken.json",
        r#"{
            "title": " ",
            "inventory": {"path": "inventario.csv", "facets": []},
            "galleries": [{"name": "g", "dir": ".", "stem": "g", "count": 0}]
        }"#,
    );

    match load_config(dir.path().join("broken.json")) {
        Err(DashboardError::InvalidConfig(errors)) => assert_eq!(errors.len(), 3),
        other => panic!("expected InvalidConfig, got {:?}", other),
    }
}
