//! Recursive tree rendering
//!
//! Walks the person graph outward from a proband and hands every node and
//! family group to a [`TemplateEngine`]. Fragments are assembled bottom-up.

pub mod child_tree;
pub mod options;
pub mod parent_tree;
pub mod person_view;
pub mod template;
pub mod text;
pub mod tree;

pub use child_tree::{ChildTreeData, UnionData};
pub use options::{
    GenderOrder, LastnamePolicy, NodeType, RenderPersonOptions, RenderTreeOptions,
    GENERATIONS_NONE, GENERATIONS_UNLIMITED,
};
pub use parent_tree::ParentTreeData;
pub use person_view::{PersonData, PersonView, ROOT_NODE_ATTRIBUTE};
pub use template::{substitute, StringTemplates, TemplateEngine, TemplateKind};
pub use text::{collapse_blank_lines, strip_comment_lines};
pub use tree::{
    render_child_subtree, render_parent_subtree, render_person, render_tree, TreeData,
    TreeRenderer,
};
