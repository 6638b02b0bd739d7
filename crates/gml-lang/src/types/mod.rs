pub mod transform;
pub mod vecmat;
