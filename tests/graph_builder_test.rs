//! Tests for GraphBuilder and RelationArena links

use itemquiz::domain::GraphBuilder;
use itemquiz::util::testing::{catalog, chain_catalog, crafted, item, quiz_catalog};

#[test]
fn given_chain_when_building_then_links_are_symmetric() {
    // Arrange
    let catalog = chain_catalog();

    // Act
    let graph = GraphBuilder::new().build(&catalog);

    // Assert
    assert_eq!(graph.len(), 3);
    for (idx, node) in graph.iter() {
        for &child in &node.children {
            let child_node = graph.get_node(child).expect("child node");
            assert!(child_node.parents.contains(&idx));
        }
        for &parent in &node.parents {
            let parent_node = graph.get_node(parent).expect("parent node");
            assert!(parent_node.children.contains(&idx));
        }
    }
}

#[test]
fn given_chain_when_building_then_children_follow_materials() {
    // Arrange
    let catalog = chain_catalog();

    // Act
    let graph = GraphBuilder::new().build(&catalog);

    // Assert
    let c = graph.index_of("3").expect("C");
    let b = graph.index_of("2").expect("B");
    let a = graph.index_of("1").expect("A");
    assert_eq!(graph.child_ids(c), vec!["2"]);
    assert_eq!(graph.parent_ids(b), vec!["3"]);
    assert_eq!(graph.child_ids(b), vec!["1"]);
    assert!(graph.child_ids(a).is_empty());
    assert!(graph.parent_ids(c).is_empty());
}

#[test]
fn given_material_outside_catalog_when_building_then_drops_the_link() {
    // Arrange
    let catalog = catalog([("2", crafted("B", 900, &["1", "999"])), ("1", item("A", 300))]);

    // Act
    let graph = GraphBuilder::new().build(&catalog);

    // Assert
    let b = graph.index_of("2").expect("B");
    assert_eq!(graph.child_ids(b), vec!["1"]);
    assert!(graph.index_of("999").is_none());
}

#[test]
fn given_shared_material_when_building_then_material_has_all_parents() {
    // Arrange
    let catalog = quiz_catalog();

    // Act
    let graph = GraphBuilder::new().build(&catalog);

    // Assert
    let blade = graph.index_of("20").expect("Blade");
    let mut parents = graph.parent_ids(blade);
    parents.sort();
    assert_eq!(parents, vec!["30", "40"]);
}

#[test]
fn given_ally_restricted_record_when_building_then_no_node_is_created() {
    // Arrange
    let catalog = catalog([
        ("1", item("A", 300)),
        ("2", crafted("Masterwork", 3200, &["1"]).with_required_ally("Ornn")),
    ]);

    // Act
    let graph = GraphBuilder::new().build(&catalog);

    // Assert
    assert!(graph.index_of("2").is_none());
    let a = graph.index_of("1").expect("A");
    assert!(graph.parent_ids(a).is_empty());
}

#[test]
fn given_name_when_resolving_then_falls_back_from_id_to_name() {
    // Arrange
    let graph = GraphBuilder::new().build(&chain_catalog());

    // Act
    let by_id = graph.resolve("2");
    let by_name = graph.resolve("B");
    let missing = graph.resolve("Z");

    // Assert
    assert_eq!(by_id, by_name);
    assert!(by_id.is_some());
    assert!(missing.is_none());
}
