// Library root: the roster-assignment model and the surfaces that edit it.
//
// Nothing here touches a terminal or the network; front ends feed input in
// and render the views back out.

pub mod assignment;
pub mod auto_assign;
pub mod config;
pub mod controller;
pub mod drag;
pub mod dropdown;
pub mod gesture;
pub mod roster;
pub mod submission;
