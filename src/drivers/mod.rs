pub mod switch_pro;
