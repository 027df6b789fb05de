mod pause;
mod python_exec;
mod start;

pub use pause::Pause;
pub use python_exec::PythonExec;
pub use start::Start;
