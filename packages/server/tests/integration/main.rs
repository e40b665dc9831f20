mod common;

mod block_average;
