pub mod graph;
pub mod cust_error;
pub mod vc_instance;
pub mod kernelization;
pub mod bounded_search;
pub mod bipart_matching;
pub mod lp_relaxation;
pub mod naive;

pub use bounded_search::{minimum_vertex_cover, solve_vertex_cover};
