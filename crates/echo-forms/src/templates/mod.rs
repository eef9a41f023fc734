pub mod ct_mr_liver;
