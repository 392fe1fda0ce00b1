//! In-memory host window.
//!
//! Keeps the whole control tree in a `BTreeMap` keyed by [`ControlId`].
//! Used by tests and by hosts that render the tree themselves.

use std::collections::{BTreeMap, BTreeSet};

use veneer_types::{Result, Size, VeneerError};

use super::{Control, ControlId, FormState, HostWindow};

#[derive(Debug)]
struct Node {
    control: Control,
    parent: Option<ControlId>,
    children: Vec<ControlId>,
}

/// A window whose controls live entirely in memory.
#[derive(Debug)]
pub struct MemoryHost {
    form: FormState,
    nodes: BTreeMap<ControlId, Node>,
    root: ControlId,
    next_id: u64,
    dynamic: Vec<ControlId>,
    subscribed: BTreeSet<ControlId>,
}

impl MemoryHost {
    /// Create a window with only its root control, named `name`.
    pub fn new(name: &str, client_size: Size) -> Self {
        let root = ControlId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            Node {
                control: Control::container(name).sized(client_size.width, client_size.height),
                parent: None,
                children: Vec::new(),
            },
        );
        Self {
            form: FormState::new(name, client_size),
            nodes,
            root,
            next_id: 1,
            dynamic: Vec::new(),
            subscribed: BTreeSet::new(),
        }
    }

    /// Number of controls in the tree, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Whether pointer events for `id` are currently routed.
    pub fn is_subscribed(&self, id: ControlId) -> bool {
        self.subscribed.contains(&id)
    }

    /// Controls currently registered as synthesized.
    pub fn dynamic_controls(&self) -> &[ControlId] {
        &self.dynamic
    }

    /// Look a control up by exact name.
    pub fn get(&self, name: &str) -> Option<&Control> {
        self.find(name).and_then(|id| self.control(id))
    }

    fn node(&self, id: ControlId) -> Result<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| VeneerError::Host(format!("no control {id:?}")))
    }

    fn collect_subtree(&self, id: ControlId, out: &mut Vec<ControlId>) {
        out.push(id);
        if let Some(node) = self.nodes.get(&id) {
            for child in &node.children {
                self.collect_subtree(*child, out);
            }
        }
    }
}

impl HostWindow for MemoryHost {
    fn form(&self) -> &FormState {
        &self.form
    }

    fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    fn root(&self) -> ControlId {
        self.root
    }

    fn children(&self, id: ControlId) -> Vec<ControlId> {
        self.nodes
            .get(&id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn control(&self, id: ControlId) -> Option<&Control> {
        self.nodes.get(&id).map(|n| &n.control)
    }

    fn control_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.nodes.get_mut(&id).map(|n| &mut n.control)
    }

    fn attach(&mut self, parent: ControlId, control: Control) -> Result<ControlId> {
        self.node(parent)?;
        let id = ControlId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                control,
                parent: Some(parent),
                children: Vec::new(),
            },
        );
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    fn bring_to_front(&mut self, id: ControlId) -> Result<()> {
        let parent = self
            .node(id)?
            .parent
            .ok_or_else(|| VeneerError::Host("cannot raise the root control".into()))?;
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != id);
            p.children.insert(0, id);
        }
        Ok(())
    }

    fn detach(&mut self, id: ControlId) -> Result<Control> {
        if id == self.root {
            return Err(VeneerError::Host("cannot detach the root control".into()));
        }
        let parent = self.node(id)?.parent;
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != id);
        }
        let mut subtree = Vec::new();
        self.collect_subtree(id, &mut subtree);
        let mut detached = None;
        for cid in subtree {
            self.subscribed.remove(&cid);
            self.dynamic.retain(|d| *d != cid);
            if let Some(node) = self.nodes.remove(&cid)
                && cid == id
            {
                detached = Some(node.control);
            }
        }
        detached.ok_or_else(|| VeneerError::Host(format!("no control {id:?}")))
    }

    fn register_dynamic(&mut self, id: ControlId) {
        if !self.dynamic.contains(&id) {
            self.dynamic.push(id);
        }
    }

    fn take_dynamic(&mut self) -> Vec<ControlId> {
        std::mem::take(&mut self.dynamic)
    }

    fn subscribe_pointer(&mut self, id: ControlId) -> Result<()> {
        self.node(id)?;
        self.subscribed.insert(id);
        Ok(())
    }

    fn unsubscribe_pointer(&mut self, id: ControlId) {
        self.subscribed.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> MemoryHost {
        MemoryHost::new("Main", Size::new(640, 480))
    }

    #[test]
    fn new_host_has_root_only() {
        let h = host();
        assert_eq!(h.len(), 1);
        assert!(h.is_empty());
        assert_eq!(h.form().caption, "Main");
        assert_eq!(h.form().client_size, Size::new(640, 480));
        assert!(h.form().show_icon);
    }

    #[test]
    fn attach_goes_to_back_and_raise_to_front() {
        let mut h = host();
        let root = h.root();
        let a = h.attach(root, Control::label("a")).unwrap();
        let b = h.attach(root, Control::label("b")).unwrap();
        assert_eq!(h.children(root), vec![a, b]);
        h.bring_to_front(b).unwrap();
        assert_eq!(h.children(root), vec![b, a]);
    }

    #[test]
    fn attach_to_unknown_parent_fails() {
        let mut h = host();
        let err = h.attach(ControlId(99), Control::label("x")).unwrap_err();
        assert!(format!("{err}").contains("host error"));
    }

    #[test]
    fn detach_removes_subtree_and_bookkeeping() {
        let mut h = host();
        let root = h.root();
        let panel = h.attach(root, Control::container("panel")).unwrap();
        let btn = h.attach(panel, Control::image_surface("btn")).unwrap();
        h.register_dynamic(btn);
        h.subscribe_pointer(btn).unwrap();
        let removed = h.detach(panel).unwrap();
        assert_eq!(removed.name, "panel");
        assert!(h.control(btn).is_none());
        assert!(!h.is_subscribed(btn));
        assert!(h.dynamic_controls().is_empty());
        assert!(h.children(root).is_empty());
    }

    #[test]
    fn root_cannot_be_detached_or_raised() {
        let mut h = host();
        let root = h.root();
        assert!(h.detach(root).is_err());
        assert!(h.bring_to_front(root).is_err());
    }

    #[test]
    fn take_dynamic_drains() {
        let mut h = host();
        let root = h.root();
        let a = h.attach(root, Control::image_surface("a")).unwrap();
        h.register_dynamic(a);
        h.register_dynamic(a);
        assert_eq!(h.take_dynamic(), vec![a]);
        assert!(h.take_dynamic().is_empty());
    }

    #[test]
    fn get_by_name() {
        let mut h = host();
        let root = h.root();
        h.attach(root, Control::label("lblTitle")).unwrap();
        assert_eq!(h.get("lblTitle").map(|c| c.name.as_str()), Some("lblTitle"));
        assert!(h.get("missing").is_none());
    }
}
