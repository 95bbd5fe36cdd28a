// Wire contract constants for the Paytm initiate-transaction protocol.

pub const REQUEST_TYPE_PAYMENT: &str = "Payment";
pub const CURRENCY_INR: &str = "INR";

pub const INITIATE_TXN_PATH: &str = "theia/api/v1/initiateTransaction";

// The integrity signature travels as a request header; the JSON body stays
// exactly the string that was signed.
pub const SIGNATURE_HEADER: &str = "signature";

// Default values
pub const DEFAULT_CUSTOMER_ID: &str = "guest";

// Order id scheme: ORD_{unixMillis}_{seq}{random, 6 digits}
pub const ORDER_ID_PREFIX: &str = "ORD";
pub const ORDER_ID_SUFFIX_BOUND: u32 = 1_000_000;
