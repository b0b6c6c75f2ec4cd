// ── Area hierarchy ──
//
// Static two-level containment tree: root region -> districts -> pump
// stations. Used only for containment tests and panel rendering, never
// mutated at runtime.

use indexmap::IndexMap;

/// Code of the root region. The area panel starts its drill-down here.
pub const ROOT_AREA: &str = "lanxi";

/// One selectable entry in the area tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaNode {
    pub code: &'static str,
    pub name: &'static str,
}

/// Static two-level mapping from a region code to its children.
///
/// `lanxi` owns the three districts; each district owns two stations.
/// Site codes map to exactly one parent district.
#[derive(Debug, Clone)]
pub struct AreaHierarchy {
    children: IndexMap<&'static str, Vec<AreaNode>>,
}

impl AreaHierarchy {
    pub fn new() -> Self {
        let mut children: IndexMap<&'static str, Vec<AreaNode>> = IndexMap::new();
        children.insert(
            ROOT_AREA,
            vec![
                AreaNode { code: "area1", name: "District One" },
                AreaNode { code: "area2", name: "District Two" },
                AreaNode { code: "area3", name: "District Three" },
            ],
        );
        children.insert(
            "area1",
            vec![
                AreaNode { code: "site1", name: "Pump Station No. 1" },
                AreaNode { code: "site2", name: "Pump Station No. 2" },
            ],
        );
        children.insert(
            "area2",
            vec![
                AreaNode { code: "site3", name: "Pump Station No. 3" },
                AreaNode { code: "site4", name: "Pump Station No. 4" },
            ],
        );
        children.insert(
            "area3",
            vec![
                AreaNode { code: "site5", name: "Pump Station No. 5" },
                AreaNode { code: "site6", name: "Pump Station No. 6" },
            ],
        );
        Self { children }
    }

    /// Direct children of a region code. Empty for leaf (site) codes and
    /// unregistered codes.
    pub fn children(&self, code: &str) -> &[AreaNode] {
        self.children.get(code).map_or(&[], Vec::as_slice)
    }

    pub fn has_children(&self, code: &str) -> bool {
        !self.children(code).is_empty()
    }

    /// Parent region of a code, if it is registered below the root.
    pub fn parent_of(&self, code: &str) -> Option<&'static str> {
        self.children
            .iter()
            .find(|(_, nodes)| nodes.iter().any(|n| n.code == code))
            .map(|(parent, _)| *parent)
    }

    /// `true` if `site` is a registered child of `area`.
    pub fn is_child_of(&self, area: &str, site: &str) -> bool {
        self.children(area).iter().any(|n| n.code == site)
    }

    /// `true` if the code appears anywhere in the tree below the root.
    pub fn is_registered(&self, code: &str) -> bool {
        self.parent_of(code).is_some()
    }

    /// Display name for a registered code.
    pub fn display_name(&self, code: &str) -> Option<&'static str> {
        self.children
            .values()
            .flat_map(|nodes| nodes.iter())
            .find(|n| n.code == code)
            .map(|n| n.name)
    }
}

impl Default for AreaHierarchy {
    fn default() -> Self {
        Self::new()
    }
}
