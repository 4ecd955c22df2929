pub mod graph_view;
pub mod help_popup;
pub mod issue_list;
pub mod issue_row;
pub mod status_bar;
