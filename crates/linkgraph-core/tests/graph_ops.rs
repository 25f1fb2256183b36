use linkgraph_core::config::LinkGraphConfig;
use linkgraph_core::graph::*;
use linkgraph_core::inventory::{PageRecord, SiteInventory};

fn make_page(path: &str, title: &str, links: &[&str]) -> PageRecord {
    let mut page = PageRecord::new(path, title);
    page.links = links.iter().map(|l| (*l).to_string()).collect();
    page
}

fn make_site() -> SiteInventory {
    SiteInventory::new(vec![
        make_page("/topics/ai", "AI Hub", &["/blog/a", "/blog/b", "/guides/start"]),
        make_page("/guides/start", "Getting Started", &["/blog/a"]),
        make_page("/blog/a", "Post A", &["/blog/b", "/blog/a"]),
        make_page("/blog/b", "Post B", &[]),
        make_page("/blog/lonely", "Lonely Post", &["/blog/gone"]),
    ])
}

#[test]
fn test_from_inventory_classifies_pages() {
    let graph = LinkGraph::from_inventory(&make_site(), &LinkGraphConfig::default());

    assert_eq!(graph.pages.len(), 5);
    assert_eq!(graph.get_page("/topics/ai").unwrap().page_type, PageType::Hub);
    assert_eq!(
        graph.get_page("/guides/start").unwrap().page_type,
        PageType::Guide
    );
    assert_eq!(
        graph.get_page("/blog/a").unwrap().page_type,
        PageType::Content
    );
    assert_eq!(graph.hub_pages, vec!["/topics/ai"]);
}

#[test]
fn test_from_inventory_drops_self_links() {
    let graph = LinkGraph::from_inventory(&make_site(), &LinkGraphConfig::default());
    let a = graph.get_page("/blog/a").unwrap();
    assert_eq!(a.outgoing_links, vec!["/blog/b"]);
    for node in graph.pages.values() {
        assert!(!node.outgoing_links.contains(&node.path));
    }
}

#[test]
fn test_incoming_mirrors_outgoing() {
    let graph = LinkGraph::from_inventory(&make_site(), &LinkGraphConfig::default());

    let a = graph.get_page("/blog/a").unwrap();
    assert_eq!(a.incoming_links, vec!["/guides/start", "/topics/ai"]);

    let b = graph.get_page("/blog/b").unwrap();
    assert_eq!(b.incoming_links, vec!["/blog/a", "/topics/ai"]);

    // Every incoming entry has a matching outgoing entry and vice versa.
    for node in graph.pages.values() {
        for source in &node.incoming_links {
            assert!(graph.get_page(source).unwrap().links_to(&node.path));
        }
        for target in &node.outgoing_links {
            if let Some(t) = graph.get_page(target) {
                assert!(t.incoming_links.contains(&node.path));
            }
        }
    }
}

#[test]
fn test_dangling_links_are_kept_but_not_linked() {
    let graph = LinkGraph::from_inventory(&make_site(), &LinkGraphConfig::default());

    let lonely = graph.get_page("/blog/lonely").unwrap();
    assert_eq!(lonely.outgoing_links, vec!["/blog/gone"]);
    assert!(graph.get_page("/blog/gone").is_none());
    assert_eq!(
        graph.dangling_links(),
        vec![("/blog/lonely".to_string(), "/blog/gone".to_string())]
    );
    assert_eq!(graph.metadata.dangling_links, 1);
}

#[test]
fn test_metadata_averages() {
    let graph = LinkGraph::from_inventory(&make_site(), &LinkGraphConfig::default());

    // Outgoing: 3 + 1 + 1 + 0 + 1 = 6; incoming: 0 + 1 + 2 + 2 + 0 = 5
    assert_eq!(graph.metadata.total_pages, 5);
    assert_eq!(graph.metadata.total_links, 6);
    assert_eq!(graph.metadata.average_outgoing, 1.2);
    assert_eq!(graph.metadata.average_incoming, 1.0);
}

#[test]
fn test_find_orphan_pages() {
    let graph = LinkGraph::from_inventory(&make_site(), &LinkGraphConfig::default());
    assert_eq!(find_orphan_pages(&graph), vec!["/blog/lonely", "/topics/ai"]);
    assert_eq!(graph.orphan_pages, find_orphan_pages(&graph));
}

#[test]
fn test_adding_incoming_link_removes_orphan() {
    let mut graph = LinkGraph::from_inventory(&make_site(), &LinkGraphConfig::default());
    assert!(graph.orphan_pages.contains(&"/blog/lonely".to_string()));

    assert!(graph.add_link("/blog/b", "/blog/lonely"));

    assert!(!find_orphan_pages(&graph).contains(&"/blog/lonely".to_string()));
    assert!(!graph.orphan_pages.contains(&"/blog/lonely".to_string()));
    assert_eq!(
        graph.get_page("/blog/lonely").unwrap().incoming_links,
        vec!["/blog/b"]
    );
}

#[test]
fn test_orphans_match_empty_incoming_exactly() {
    let graph = LinkGraph::from_inventory(&make_site(), &LinkGraphConfig::default());
    let orphans = find_orphan_pages(&graph);
    for node in graph.pages.values() {
        assert_eq!(
            orphans.contains(&node.path),
            node.incoming_links.is_empty(),
            "orphan mismatch for {}",
            node.path
        );
    }
}

#[test]
fn test_empty_inventory() {
    let graph = LinkGraph::from_inventory(&SiteInventory::default(), &LinkGraphConfig::default());
    assert!(graph.pages.is_empty());
    assert!(graph.orphan_pages.is_empty());
    assert!(graph.hub_pages.is_empty());
    assert_eq!(graph.metadata, GraphMetadata::default());
}

#[test]
fn test_custom_page_type_table() {
    let toml_str = r#"
[[page_types]]
page_type = "hub"
patterns = ["/hubs/"]

[[page_types]]
page_type = "pseo"
patterns = ["/compare/"]
"#;
    let config: LinkGraphConfig = toml::from_str(toml_str).unwrap();
    let inventory = SiteInventory::new(vec![
        make_page("/hubs/web", "Web", &[]),
        make_page("/compare/a-vs-b", "A vs B", &[]),
        make_page("/topics/old", "Old Topic", &[]),
    ]);
    let graph = LinkGraph::from_inventory(&inventory, &config);

    assert_eq!(graph.get_page("/hubs/web").unwrap().page_type, PageType::Hub);
    assert_eq!(
        graph.get_page("/compare/a-vs-b").unwrap().page_type,
        PageType::Pseo
    );
    // No longer a hub pattern under this table
    assert_eq!(
        graph.get_page("/topics/old").unwrap().page_type,
        PageType::Content
    );
}

#[test]
fn test_graph_json_is_deterministic() {
    let config = LinkGraphConfig::default();
    let first = LinkGraph::from_inventory(&make_site(), &config);
    let second = LinkGraph::from_inventory(&make_site(), &config);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
