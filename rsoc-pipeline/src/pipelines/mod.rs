pub mod task_generation;
