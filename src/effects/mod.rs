pub mod delay;
pub mod reverb;

/// An in-place audio processor run by a graph node
pub trait Effect: Send {
    fn process(&mut self, input: &mut [f32]);
}
