use invdash_core::*;

fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::from_rows(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

fn scenario() -> Table {
    table(
        &["Component", "Result", "Crops"],
        &[
            &["A", "X", "Rice, Coffee"],
            &["A", "Y", "Rice"],
            &["B", "X", "Coffee"],
        ],
    )
}

fn inventory() -> Table {
    table(
        &["Componente", "Resultado", "Cultivos Asociados", "Producto N°"],
        &[
            &["1", "1.1", "Arroz, Café", "001"],
            &["1", "1.2", "Banano", "002"],
            &["2", "2.1", "Caña de azucar, arroz", "003"],
            &["2", "2.1", "", "004"],
            &["1", "1.1", "Banano,,Café", "005"],
        ],
    )
}

fn rows(outcome: &FilterOutcome) -> Vec<usize> {
    outcome.records().iter().map(|r| r.row).collect()
}

#[test]
fn test_end_to_end_scenario() {
    let t = scenario();
    let component = FacetSpec::exact("Component");
    let result = FacetSpec::exact("Result");
    let crops = FacetSpec::multi_value("Crops");

    assert_eq!(options_for(&t, &[], &component).unwrap(), vec!["A", "B"]);

    let prior = vec![Selection::new(component.clone(), "A")];
    assert_eq!(options_for(&t, &prior, &result).unwrap(), vec!["X", "Y"]);

    let prior = vec![
        Selection::new(component.clone(), "A"),
        Selection::new(result.clone(), "X"),
    ];
    assert_eq!(
        options_for(&t, &prior, &crops).unwrap(),
        vec!["all", "coffee", "rice"]
    );

    let selections = vec![
        Selection::new(component, "A"),
        Selection::new(result, "X"),
        Selection::new(crops, "rice"),
    ];
    assert_eq!(rows(&filter(&t, &selections).unwrap()), vec![0]);
}

#[test]
fn test_filtered_records_are_a_subset_satisfying_every_predicate() {
    let t = inventory();
    let selections = vec![
        Selection::new(FacetSpec::exact("Componente"), "1"),
        Selection::new(FacetSpec::multi_value("Cultivos Asociados"), "café"),
    ];

    let outcome = filter(&t, &selections).unwrap();
    assert_eq!(rows(&outcome), vec![0, 4]);
    for record in outcome.records() {
        assert!(t.records().contains(record));
        assert!(matches_all(record, &selections));
    }
}

#[test]
fn test_filter_is_idempotent() {
    let t = inventory();
    let selections = vec![
        Selection::new(FacetSpec::exact("Resultado"), "2.1"),
        Selection::new(FacetSpec::multi_value("Cultivos Asociados"), "arroz"),
    ];

    let once = filter(&t, &selections).unwrap();
    let again_table = Table::from_rows(
        t.headers().to_vec(),
        once.records()
            .iter()
            .map(|r| r.iter().map(|(_, v)| v.to_string()).collect())
            .collect(),
    );
    let twice = filter(&again_table, &selections).unwrap();

    let cells = |o: &FilterOutcome| -> Vec<String> {
        o.records()
            .iter()
            .map(|r| r.get_or_empty("Producto N°").to_string())
            .collect()
    };
    assert_eq!(cells(&once), vec!["003"]);
    assert_eq!(cells(&once), cells(&twice));
}

#[test]
fn test_final_set_is_order_independent() {
    let t = inventory();
    let a = Selection::new(FacetSpec::exact("Componente"), "1");
    let b = Selection::new(FacetSpec::exact("Resultado"), "1.1");
    let c = Selection::new(FacetSpec::multi_value("Cultivos Asociados"), "banano");

    let orders = [
        vec![a.clone(), b.clone(), c.clone()],
        vec![c.clone(), b.clone(), a.clone()],
        vec![b.clone(), a.clone(), c.clone()],
        vec![c, a, b],
    ];

    let expected = rows(&filter(&t, &orders[0]).unwrap());
    assert_eq!(expected, vec![4]);
    for order in &orders[1..] {
        assert_eq!(rows(&filter(&t, order).unwrap()), expected);
    }
}

#[test]
fn test_options_depend_on_selection_order() {
    let t = inventory();
    let componente = FacetSpec::exact("Componente");
    let resultado = FacetSpec::exact("Resultado");

    let by_component = vec![Selection::new(componente.clone(), "2")];
    assert_eq!(options_for(&t, &by_component, &resultado).unwrap(), vec!["2.1"]);

    assert_eq!(
        options_for(&t, &[], &resultado).unwrap(),
        vec!["1.1", "1.2", "2.1"]
    );
}

#[test]
fn test_sentinel_equals_omitting_the_facet() {
    let t = inventory();
    let component = Selection::new(FacetSpec::exact("Componente"), "2");
    let all = Selection::new(FacetSpec::multi_value("Cultivos Asociados"), ALL_SENTINEL);

    let with_sentinel = filter(&t, &[component.clone(), all]).unwrap();
    let without = filter(&t, &[component]).unwrap();
    assert_eq!(with_sentinel, without);
    assert_eq!(rows(&with_sentinel), vec![2, 3]);
}

#[test]
fn test_substring_match_is_loose() {
    // "arroz" is offered as a tag but also matches the longer "Arrozales"
    let t = table(&["Crops"], &[&["Arrozales"]]);
    let selections = vec![Selection::new(FacetSpec::multi_value("Crops"), "arroz")];
    assert_eq!(rows(&filter(&t, &selections).unwrap()), vec![0]);
}

#[test]
fn test_no_matches_is_not_an_error() {
    let t = inventory();
    let selections = vec![
        Selection::new(FacetSpec::exact("Componente"), "1"),
        Selection::new(FacetSpec::multi_value("Cultivos Asociados"), "caña"),
    ];
    assert_eq!(filter(&t, &selections).unwrap(), FilterOutcome::NoMatches);
}

#[test]
fn test_tags_are_unioned_across_scope() {
    let t = inventory();
    let options = options_for(&t, &[], &FacetSpec::multi_value("Cultivos Asociados")).unwrap();
    assert_eq!(
        options,
        vec!["all", "arroz", "banano", "café", "caña de azucar"]
    );
}

#[test]
fn test_numeric_looking_values_compare_as_text() {
    let t = inventory();
    let selections = vec![Selection::new(FacetSpec::exact("Producto N°"), "1")];
    assert!(filter(&t, &selections).unwrap().is_empty());

    let selections = vec![Selection::new(FacetSpec::exact("Producto N°"), "001")];
    assert_eq!(rows(&filter(&t, &selections).unwrap()), vec![0]);
}

#[test]
fn test_cascade_with_explicit_choices() {
    let t = inventory();
    let facets = vec![
        FacetSpec::exact("Componente"),
        FacetSpec::exact("Resultado"),
        FacetSpec::multi_value("Cultivos Asociados"),
    ];
    let choices = parse_selection_args(&[
        "Componente=1".to_string(),
        "Resultado=1.1".to_string(),
        "Cultivos Asociados=Banano".to_string(),
    ]);

    let result = resolve_cascade(&t, &facets, &choices).unwrap();
    assert_eq!(result.steps[2].options, vec!["all", "arroz", "banano", "café"]);
    assert_eq!(result.steps[2].selected.as_deref(), Some("banano"));
    assert_eq!(rows(&result.outcome), vec![4]);
    assert_eq!(result.selections().len(), 3);
}
