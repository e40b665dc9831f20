pub mod annual_average;
pub mod block_average;
pub mod course;
pub mod exam_record;
pub mod grade;
pub mod qualification;
pub mod role;
pub mod role_permission;
pub mod schedule;
pub mod school_day;
pub mod section;
pub mod student;
pub mod teacher;
pub mod teacher_group;
pub mod teaching_block;
pub mod user;
pub mod year;
