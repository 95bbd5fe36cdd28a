pub mod paytm;
