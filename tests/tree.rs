use namekit::contract::ContractViolation;
use namekit::names::Name;
use namekit::tree::{Directory, File, FileState, Link, NodeType, root_node};

#[test]
fn removed_child_is_no_longer_found() {
    let home = Directory::new("search", &root_node()).unwrap();
    let file = File::new("x", &home).unwrap();

    let found = home.find_nodes("x").unwrap();
    assert_eq!(found.len(), 1);
    assert!(found.contains(file.node()));

    home.remove_child_node(&file).unwrap();
    assert!(home.find_nodes("x").unwrap().is_empty());
}

#[test]
fn full_names_follow_moves() {
    let usr = Directory::new("usr", &root_node()).unwrap();
    let bin = Directory::new("bin", &usr).unwrap();
    let local = Directory::new("local", &usr).unwrap();
    let ls = File::new("ls", &bin).unwrap();

    let full_name = ls.full_name().unwrap();
    assert_eq!(full_name.delimiter_character(), '/');
    assert_eq!(full_name.as_string(), "usr/bin/ls");
    assert_eq!(ls.path().unwrap(), "/usr/bin/ls");

    ls.move_to(&local).unwrap();
    assert!(!bin.has_child_node(&ls));
    assert!(local.has_child_node(&ls));
    assert!(ls.parent_node().unwrap().has_child_node(&ls));
    assert_eq!(ls.path().unwrap(), "/usr/local/ls");
}

#[test]
fn directory_cannot_move_below_itself() {
    let outer = Directory::new("outer", &root_node()).unwrap();
    let inner = Directory::new("inner", &outer).unwrap();

    assert!(outer.move_to(&inner).unwrap_err().is_argument_error());
    assert!(outer.move_to(&outer).is_err());
    assert!(root_node().has_child_node(&outer));
    assert!(outer.has_child_node(&inner));
}

#[test]
fn file_life_cycle() {
    let home = Directory::new("docs", &root_node()).unwrap();
    let file = File::new("notes.txt", &home).unwrap();

    assert_eq!(file.state(), FileState::Closed);
    file.open().unwrap();
    assert_eq!(file.read(3).unwrap(), vec![0; 3]);
    file.close().unwrap();
    file.delete().unwrap();

    assert!(file.open().unwrap_err().is_state_error());
    assert!(file.base_name().is_ok());
}

#[test]
fn search_through_a_dangling_link_reports_one_failure() {
    let home = Directory::new("links", &root_node()).unwrap();
    let target = File::new("target", &home).unwrap();
    let link = Link::new("shortcut", &home, Some(target.node())).unwrap();
    assert_eq!(link.node_type(), NodeType::Link);

    home.remove_child_node(&target).unwrap();
    drop(target);

    let error = home.find_nodes("target").unwrap_err();
    assert!(matches!(error, ContractViolation::ServiceFailure { .. }));
    assert!(error.root_cause().is_state_error());
}

#[test]
fn root_is_its_own_parent() {
    let root = root_node();
    assert!(root.is_root());
    assert_eq!(root.node_type(), NodeType::Root);
    assert!(std::sync::Arc::ptr_eq(
        root.parent_node().unwrap().node(),
        root.node()
    ));
    assert!(root.full_name().unwrap().is_empty());
}
