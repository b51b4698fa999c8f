pub mod lambda_handler;
